/*
    This module parses deriveration paths passed in as strings
    into vectors of ChildOptions that can be used to derive a child key,
    and resolves the standard path of each wallet type.
*/

use std::{
    fmt,
    str::FromStr
};

use crate::{
    error::{Error, Result},
    hdwallet::{
        ChildOptions,
        WalletType,
        ckd::HARDENED_OFFSET
    },
    util::Network
};


#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub children: Vec<ChildOptions>
}

impl Path {
    pub fn empty() -> Self {
        Self {
            children: vec![]
        }
    }

    /**
        Account level path of a wallet type:
        m/purpose'/coin'/account' and, for P2WSH, an extra script type level (2').
    */
    pub fn for_account(wallet_type: WalletType, network: Network, account: u32) -> Self {
        let mut children = vec![
            ChildOptions::Hardened(wallet_type.purpose()),
            ChildOptions::Hardened(network.coin_type()),
            ChildOptions::Hardened(account)
        ];
        if let Some(script_type) = wallet_type.script_type() {
            children.push(ChildOptions::Hardened(script_type));
        }

        Self { children }
    }

    /**
        Full path of an address: the account path followed by change/index.
    */
    pub fn for_address(wallet_type: WalletType, network: Network, account: u32, change: u32, index: u32) -> Self {
        let mut path = Self::for_account(wallet_type, network, account);
        path.children.extend(Self::relative(change, index).children);
        path
    }

    /**
        The non hardened change/index levels below an account key.
    */
    pub fn relative(change: u32, index: u32) -> Self {
        Self {
            children: vec![ChildOptions::Normal(change), ChildOptions::Normal(index)]
        }
    }
}

impl FromStr for Path {
    type Err = Error;

    /// Parses paths such as m/84'/0'/0'/0/0. Hardened levels are marked with ', h or H.
    fn from_str(path: &str) -> Result<Self> {
        let mut segments = path.trim().split('/');
        if segments.next() != Some("m") {
            return Err(Error::InvalidPath(path.to_string()))
        }

        let mut children: Vec<ChildOptions> = vec![];
        for segment in segments {
            let (digits, hardened) = match segment.strip_suffix(|c: char| c == '\'' || c == 'h' || c == 'H') {
                Some(x) => (x, true),
                None => (segment, false)
            };
            let index: u32 = digits.parse().map_err(|_| Error::InvalidPath(path.to_string()))?;
            if index >= HARDENED_OFFSET { return Err(Error::InvalidChildIndex(index)) }

            children.push(if hardened { ChildOptions::Hardened(index) } else { ChildOptions::Normal(index) });
        }

        Ok(Self { children })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in self.children.iter() {
            match child {
                ChildOptions::Normal(x) => write!(f, "/{}", x)?,
                ChildOptions::Hardened(x) => write!(f, "/{}'", x)?
            }
        }
        Ok(())
    }
}
