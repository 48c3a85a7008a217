/*

    Script builder module.

*/

use super::RedeemScript;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub code: Vec<u8>
}

impl Builder {
    /// Return a new instance of self
    pub fn new() -> Self  {
        Self { code: Vec::new() }
    }

    /// Push an opcode into self
    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.code.push(opcode.into_u8());
        self
    }

    //Push a slice into the code
    pub fn push_slice(mut self, slice: &[u8]) -> Self {
        self.code.extend_from_slice(slice);
        self
    }

    /// Push data preceded by its direct push opcode.
    /// Only pushes of up to 75 bytes are needed by the standard scripts built here.
    pub fn push_data(self, data: &[u8]) -> Self {
        debug_assert!(data.len() <= 75);
        self.push_opcode(Opcode::from(data.len() as u8)).push_slice(data)
    }

    /// Push a small number (0 to 16) as OP_0 / OP_1..OP_16
    pub fn push_int(self, n: u8) -> Self {
        debug_assert!(n <= 16);
        match n {
            0 => self.push_opcode(opcodes::OP_0),
            n => self.push_opcode(Opcode::from(opcodes::OP_1.into_u8() + n - 1))
        }
    }

    /// Convert self into a redeem script
    pub fn into_script(self) -> RedeemScript {
        RedeemScript::new(self.code)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    code: u8
}

impl Opcode {
    pub fn into_u8(self) -> u8 {
        self.code
    }
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Self {
        Self { code }
    }
}

// Opcode constants
pub mod opcodes {
    use super::Opcode;

    /// Push an empty array onto the stack
    pub const OP_0: Opcode = Opcode {code: 0x00};
    /// Push the next 20 bytes as an array onto the stack
    pub const OP_PUSHBYTES_20: Opcode = Opcode {code: 0x14};
    /// Push the next 32 bytes as an array onto the stack
    pub const OP_PUSHBYTES_32: Opcode = Opcode {code: 0x20};
    /// Push the number 1 onto the stack. OP_2 to OP_16 follow on consecutively.
    pub const OP_1: Opcode = Opcode {code: 0x51};
    /// Duplicates the top stack item
    pub const OP_DUP: Opcode = Opcode {code: 0x76};
    /// Returns 1 if the inputs are exactly equal, 0 otherwise
    pub const OP_EQUAL: Opcode = Opcode {code: 0x87};
    /// Same as OP_EQUAL, but runs OP_VERIFY afterward
    pub const OP_EQUALVERIFY: Opcode = Opcode {code: 0x88};
    /// The input is hashed twice: first with SHA-256 and then with RIPEMD-160
    pub const OP_HASH160: Opcode = Opcode {code: 0xa9};
    /// Checks a signature against a public key
    pub const OP_CHECKSIG: Opcode = Opcode {code: 0xac};
    /// Checks m signatures against n public keys
    pub const OP_CHECKMULTISIG: Opcode = Opcode {code: 0xae};
}
