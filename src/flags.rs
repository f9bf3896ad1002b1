use std::fmt;

/// Classification of the byte most recently fed to the parser.
///
/// Flags are not one-hot: a byte inside `class="x"` is simultaneously
/// [`Flag::Tag`], [`Flag::Value`], and (if it is the first value byte)
/// [`Flag::ValueBeginning`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flag {
    InnerText,
    InnerTextBeginning,
    Tag,
    TagBeginning,
    TagEnd,
    Name,
    NameBeginning,
    NameEnded,
    Attribute,
    AttributeBeginning,
    AttributeEnded,
    Value,
    ValueBeginning,
    ValueEnded,
    ValueQuoted,
    ValueSingleQuoted,
    ValueDoubleQuoted,
    Space,
    Equality,
    Slash,
    ClosingTag,
    Script,
    Comment,
    // Entity decoding is unimplemented; this flag is never set.
    Entity,
}

impl Flag {
    pub const ALL: [Flag; 24] = [
        Flag::InnerText,
        Flag::InnerTextBeginning,
        Flag::Tag,
        Flag::TagBeginning,
        Flag::TagEnd,
        Flag::Name,
        Flag::NameBeginning,
        Flag::NameEnded,
        Flag::Attribute,
        Flag::AttributeBeginning,
        Flag::AttributeEnded,
        Flag::Value,
        Flag::ValueBeginning,
        Flag::ValueEnded,
        Flag::ValueQuoted,
        Flag::ValueSingleQuoted,
        Flag::ValueDoubleQuoted,
        Flag::Space,
        Flag::Equality,
        Flag::Slash,
        Flag::ClosingTag,
        Flag::Script,
        Flag::Comment,
        Flag::Entity,
    ];
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct FlagSet(u32);

impl FlagSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    fn bit(flag: Flag) -> u32 {
        1 << flag as u32
    }

    #[inline]
    pub fn contains(self, flag: Flag) -> bool {
        self.0 & Self::bit(flag) != 0
    }

    #[inline]
    pub fn insert(&mut self, flag: Flag) {
        self.0 |= Self::bit(flag);
    }

    #[inline]
    pub fn remove(&mut self, flag: Flag) {
        self.0 &= !Self::bit(flag);
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(Flag::ALL.iter().filter(|flag| self.contains(**flag)))
            .finish()
    }
}
