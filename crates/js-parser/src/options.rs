use serde::Deserialize;

/// How strictly reserved words are rejected as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowReserved {
    /// No checks at all.
    Yes,
    /// Identifier references and bindings may not be reserved words.
    #[default]
    No,
    /// Property names, class member keys and private names are checked too.
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Edition number (`8` for ES2017) or year (`2017`).
    pub ecma_version: u32,
    pub allow_reserved: AllowReserved,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ecma_version: 13,
            allow_reserved: AllowReserved::No,
        }
    }
}

impl ParserOptions {
    pub fn new(ecma_version: u32) -> Self {
        Self {
            ecma_version,
            ..Self::default()
        }
    }

    pub fn with_allow_reserved(mut self, allow_reserved: AllowReserved) -> Self {
        self.allow_reserved = allow_reserved;
        self
    }

    /// The edition number, with year forms normalized (`2017` → `8`).
    pub fn version(&self) -> u32 {
        if self.ecma_version >= 2015 {
            self.ecma_version - 2009
        } else {
            self.ecma_version
        }
    }

    pub fn async_functions(&self) -> bool {
        self.version() >= 8
    }

    pub fn async_generators(&self) -> bool {
        self.version() >= 9
    }

    /// Static and instance field declarations.
    pub fn class_fields(&self) -> bool {
        self.version() >= 8
    }
}
