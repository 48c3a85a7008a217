pub mod en;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English
}

impl Language {
    pub fn word_list(&self) -> &'static [&'static str; 2048] {
        match self {
            Language::English => &en::WORDS
        }
    }

    /// Index of `word` in the list. The list is sorted so a binary search is used.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_list().binary_search(&word).ok()
    }
}
