use crate::{
    buffer::Capture,
    flags::{Flag, FlagSet},
    script::ScriptMatcher,
    text::is_html_space,
};

/// The four capture slots a caller can bind storage to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
    TagName,
    AttrName,
    AttrValue,
    InnerText,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::TagName, Slot::AttrName, Slot::AttrValue, Slot::InnerText];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Data,
    TagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    Comment,
    ScriptData,
    ScriptDataLessThan,
    ScriptDataEndTagOpen,
    ScriptDataEndTagName,
}

/// Push parser for a stream of HTML bytes.
///
/// There is no token object: feed one byte at a time with
/// [`feed`](HtmlParser::feed) and query the classification of that byte via
/// [`is_in`](HtmlParser::is_in) and the slot accessors. Bound slot storage is
/// borrowed from the caller until [`release`](HtmlParser::release) or
/// [`reset`](HtmlParser::reset).
///
/// Malformed markup never fails; every byte has a defined transition. The
/// only caller-visible degradation is silent truncation, detectable by
/// comparing [`real_len`](HtmlParser::real_len) with
/// [`len`](HtmlParser::len).
pub struct HtmlParser<'a> {
    state: State,
    flags: FlagSet,
    script: ScriptMatcher,
    tag_name: Capture<'a>,
    attr_name: Capture<'a>,
    attr_value: Capture<'a>,
    inner_text: Capture<'a>,
}

/// Computes the post-byte state and flag vector. Pure in its inputs so each
/// state's behavior can be pinned down in isolation; slot routing happens
/// afterward, against the values returned here.
fn step(
    state: State,
    flags: FlagSet,
    script: ScriptMatcher,
    byte: u8,
) -> (State, FlagSet, ScriptMatcher) {
    let mut flags = flags;
    let mut script = script;
    let state = match state {
        State::Data => {
            if byte == b'<' {
                flags = FlagSet::EMPTY;
                flags.insert(Flag::Tag);
                flags.insert(Flag::TagBeginning);
                State::TagOpen
            } else {
                if flags.contains(Flag::InnerText) {
                    flags.remove(Flag::InnerTextBeginning);
                } else {
                    flags = FlagSet::EMPTY;
                    flags.insert(Flag::InnerText);
                    flags.insert(Flag::InnerTextBeginning);
                }
                State::Data
            }
        }
        State::TagOpen => {
            flags.remove(Flag::TagBeginning);
            script.reset();
            match byte {
                b'/' => {
                    flags.insert(Flag::ClosingTag);
                    flags.insert(Flag::Slash);
                    flags.insert(Flag::Name);
                    flags.insert(Flag::NameBeginning);
                    State::TagName
                }
                b'!' => {
                    flags.insert(Flag::Comment);
                    State::Comment
                }
                b'>' => {
                    flags.insert(Flag::TagEnd);
                    State::Data
                }
                // a second `<` keeps waiting for the tag to really open
                b'<' => State::TagOpen,
                byte if byte.is_ascii_alphabetic() => {
                    flags.insert(Flag::Name);
                    flags.insert(Flag::NameBeginning);
                    State::TagName
                }
                _ => {
                    // not a tag after all; the `<` is discarded and a fresh
                    // inner-text region starts at this byte
                    flags = FlagSet::EMPTY;
                    flags.insert(Flag::InnerText);
                    flags.insert(Flag::InnerTextBeginning);
                    State::Data
                }
            }
        }
        State::TagName => {
            flags.remove(Flag::NameBeginning);
            flags.remove(Flag::Slash);
            match byte {
                b'>' => {
                    flags.insert(Flag::TagEnd);
                    flags.insert(Flag::NameEnded);
                    flags.remove(Flag::Name);
                    State::Data
                }
                byte if is_html_space(byte) => {
                    flags.insert(Flag::Space);
                    flags.insert(Flag::NameEnded);
                    flags.remove(Flag::Name);
                    State::BeforeAttributeName
                }
                _ => State::TagName,
            }
        }
        State::BeforeAttributeName => {
            flags.remove(Flag::NameEnded);
            flags.remove(Flag::AttributeEnded);
            flags.remove(Flag::ValueEnded);
            flags.remove(Flag::ValueQuoted);
            flags.remove(Flag::ValueSingleQuoted);
            flags.remove(Flag::ValueDoubleQuoted);
            flags.remove(Flag::Equality);
            if is_html_space(byte) {
                State::BeforeAttributeName
            } else {
                flags.remove(Flag::Space);
                match byte {
                    b'>' => {
                        flags.insert(Flag::TagEnd);
                        State::Data
                    }
                    b'=' => {
                        flags.insert(Flag::Equality);
                        State::BeforeAttributeValue
                    }
                    _ => {
                        flags.insert(Flag::Attribute);
                        flags.insert(Flag::AttributeBeginning);
                        State::AttributeName
                    }
                }
            }
        }
        State::AttributeName => {
            flags.remove(Flag::AttributeBeginning);
            match byte {
                b'>' => {
                    flags.insert(Flag::TagEnd);
                    flags.remove(Flag::Attribute);
                    flags.insert(Flag::AttributeEnded);
                    State::Data
                }
                b'=' => {
                    flags.insert(Flag::Equality);
                    flags.remove(Flag::Attribute);
                    flags.insert(Flag::AttributeEnded);
                    State::BeforeAttributeValue
                }
                byte if is_html_space(byte) => {
                    flags.insert(Flag::Space);
                    flags.remove(Flag::Attribute);
                    flags.insert(Flag::AttributeEnded);
                    State::BeforeAttributeName
                }
                _ => State::AttributeName,
            }
        }
        State::BeforeAttributeValue => {
            flags.remove(Flag::Equality);
            flags.remove(Flag::AttributeEnded);
            if is_html_space(byte) {
                flags.insert(Flag::Space);
                State::BeforeAttributeValue
            } else {
                flags.remove(Flag::Space);
                match byte {
                    b'>' => {
                        flags.insert(Flag::TagEnd);
                        State::Data
                    }
                    b'"' => {
                        flags.insert(Flag::ValueQuoted);
                        flags.insert(Flag::ValueDoubleQuoted);
                        State::AttributeValueDoubleQuoted
                    }
                    b'\'' => {
                        flags.insert(Flag::ValueQuoted);
                        flags.insert(Flag::ValueSingleQuoted);
                        State::AttributeValueSingleQuoted
                    }
                    _ => {
                        flags.insert(Flag::Value);
                        flags.insert(Flag::ValueBeginning);
                        State::AttributeValueUnquoted
                    }
                }
            }
        }
        State::AttributeValueDoubleQuoted => {
            if !flags.contains(Flag::Value) {
                flags.insert(Flag::Value);
                flags.insert(Flag::ValueBeginning);
            } else {
                flags.remove(Flag::ValueBeginning);
            }
            if byte == b'"' {
                flags.remove(Flag::Value);
                flags.insert(Flag::ValueEnded);
                State::BeforeAttributeName
            } else {
                State::AttributeValueDoubleQuoted
            }
        }
        State::AttributeValueSingleQuoted => {
            flags.insert(Flag::Value);
            flags.remove(Flag::ValueBeginning);
            if byte == b'\'' {
                flags.remove(Flag::Value);
                flags.insert(Flag::ValueEnded);
                State::BeforeAttributeName
            } else {
                State::AttributeValueSingleQuoted
            }
        }
        State::AttributeValueUnquoted => {
            flags.remove(Flag::ValueBeginning);
            match byte {
                b'>' => {
                    flags.insert(Flag::TagEnd);
                    flags.remove(Flag::Value);
                    flags.insert(Flag::ValueEnded);
                    State::Data
                }
                byte if is_html_space(byte) => {
                    flags.insert(Flag::Space);
                    flags.remove(Flag::Value);
                    flags.insert(Flag::ValueEnded);
                    State::BeforeAttributeName
                }
                _ => State::AttributeValueUnquoted,
            }
        }
        State::Comment => {
            // no sub-structure: everything up to the first `>` is absorbed
            if byte == b'>' {
                flags.insert(Flag::TagEnd);
                State::Data
            } else {
                State::Comment
            }
        }
        State::ScriptData => {
            if byte == b'<' {
                State::ScriptDataLessThan
            } else {
                State::ScriptData
            }
        }
        State::ScriptDataLessThan => match byte {
            b'<' => State::ScriptDataLessThan,
            b'/' => {
                script.reset();
                State::ScriptDataEndTagOpen
            }
            _ => State::ScriptData,
        },
        State::ScriptDataEndTagOpen | State::ScriptDataEndTagName => match byte {
            b'<' => State::ScriptDataLessThan,
            b'>' if script.is_complete() => {
                script.reset();
                flags.remove(Flag::Script);
                flags.insert(Flag::Tag);
                flags.insert(Flag::TagEnd);
                flags.insert(Flag::NameEnded);
                flags.insert(Flag::ClosingTag);
                State::Data
            }
            byte if is_html_space(byte) && script.is_complete() => {
                script.reset();
                flags.remove(Flag::Script);
                flags.insert(Flag::Tag);
                flags.insert(Flag::Space);
                flags.insert(Flag::NameEnded);
                flags.insert(Flag::ClosingTag);
                State::BeforeAttributeName
            }
            _ => State::ScriptDataEndTagName,
        },
    };
    // The recognizer only ever advances over name bytes, classified
    // post-transition: the first name byte after `<` already lands in
    // `TagName`, and the `/` after `</` lands in `ScriptDataEndTagOpen`
    // where it must not be compared.
    if matches!(state, State::TagName | State::ScriptDataEndTagName) {
        script.advance(byte);
    }
    (state, flags, script)
}

impl<'a> HtmlParser<'a> {
    pub fn new() -> Self {
        Self {
            state: State::Data,
            flags: FlagSet::EMPTY,
            script: ScriptMatcher::new(),
            tag_name: Capture::new(),
            attr_name: Capture::new(),
            attr_value: Capture::new(),
            inner_text: Capture::new(),
        }
    }

    /// Returns the parser to its initial state, unbinding every slot. A
    /// reset parser is observationally identical to a fresh one.
    pub fn reset(&mut self) {
        *self = HtmlParser::new();
    }

    /// Advances the automaton by one byte. Never fails; malformed input is
    /// reinterpreted under fixed fallback transitions.
    pub fn feed(&mut self, byte: u8) {
        // A fully matched `<script ...>` flips the next fed byte into raw
        // body scanning; the body is inert until a real `</script` close.
        if matches!(self.state, State::Data) && self.script.is_complete() {
            self.state = State::ScriptData;
            self.flags = FlagSet::EMPTY;
            self.flags.insert(Flag::Script);
        }

        let (state, flags, script) = step(self.state, self.flags, self.script, byte);
        self.state = state;
        self.flags = flags;
        self.script = script;

        // Route the byte into at most one slot, using the post-transition
        // classification. The candidate-close states inside a script body
        // collect into the tag name so the closing tag reads back normally.
        if flags.contains(Flag::InnerText) {
            if flags.contains(Flag::InnerTextBeginning) {
                self.inner_text.begin();
            }
            self.inner_text.push(byte);
        } else if flags.contains(Flag::Name)
            || matches!(state, State::ScriptDataEndTagOpen | State::ScriptDataEndTagName)
        {
            if flags.contains(Flag::NameBeginning) || matches!(state, State::ScriptDataEndTagOpen) {
                // a new tag discards stale attribute data
                self.tag_name.begin();
                self.attr_name.begin();
                self.attr_value.begin();
            }
            self.tag_name.push(byte);
        } else if flags.contains(Flag::Attribute) {
            if flags.contains(Flag::AttributeBeginning) {
                self.attr_name.begin();
                self.attr_value.begin();
            }
            self.attr_name.push(byte);
        } else if flags.contains(Flag::Value) {
            if flags.contains(Flag::ValueBeginning) {
                self.attr_value.begin();
            }
            self.attr_value.push(byte);
        }
    }

    /// Reports whether the most recently fed byte sits in the given
    /// syntactic region. Multiple memberships co-occur.
    pub fn is_in(&self, flag: Flag) -> bool {
        self.flags.contains(flag)
    }

    /// Binds caller storage to a slot. The region captured there is
    /// truncated to `storage.len()` bytes.
    pub fn bind(&mut self, slot: Slot, storage: &'a mut [u8]) {
        self.capture_mut(slot).bind(storage);
    }

    pub fn release(&mut self, slot: Slot) {
        self.capture_mut(slot).release();
    }

    /// Toggles ASCII case folding for a slot; affects only bytes fed
    /// afterward.
    pub fn set_lowercase(&mut self, slot: Slot, lowercase: bool) {
        self.capture_mut(slot).set_lowercase(lowercase);
    }

    /// Capped length of the slot's last finished region, or 0 while the
    /// region is still open.
    pub fn len(&self, slot: Slot) -> usize {
        if self.region_open(slot) {
            0
        } else {
            self.capture(slot).len()
        }
    }

    /// Length the region would have absent truncation. Not gated on the
    /// region being finished.
    pub fn real_len(&self, slot: Slot) -> usize {
        self.capture(slot).real_len()
    }

    /// Captured bytes up to [`len`](HtmlParser::len); empty while the region
    /// is open or the slot is unbound.
    pub fn slice(&self, slot: Slot) -> &[u8] {
        let len = self.len(slot);
        &self.capture(slot).bytes()[..len]
    }

    /// Length check plus byte-wise equality against the slot's contents.
    pub fn matches(&self, slot: Slot, other: &[u8]) -> bool {
        self.slice(slot) == other
    }

    fn region_open(&self, slot: Slot) -> bool {
        match slot {
            Slot::TagName => {
                self.flags.contains(Flag::Name)
                    || matches!(
                        self.state,
                        State::ScriptDataEndTagOpen | State::ScriptDataEndTagName
                    )
            }
            Slot::AttrName => self.flags.contains(Flag::Attribute),
            Slot::AttrValue => self.flags.contains(Flag::Value),
            Slot::InnerText => self.flags.contains(Flag::InnerText),
        }
    }

    fn capture(&self, slot: Slot) -> &Capture<'a> {
        match slot {
            Slot::TagName => &self.tag_name,
            Slot::AttrName => &self.attr_name,
            Slot::AttrValue => &self.attr_value,
            Slot::InnerText => &self.inner_text,
        }
    }

    fn capture_mut(&mut self, slot: Slot) -> &mut Capture<'a> {
        match slot {
            Slot::TagName => &mut self.tag_name,
            Slot::AttrName => &mut self.attr_name,
            Slot::AttrValue => &mut self.attr_value,
            Slot::InnerText => &mut self.inner_text,
        }
    }
}

impl Default for HtmlParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}
