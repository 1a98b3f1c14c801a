//! Slot walking over a section hex dump.
//!
//! A vtable occupies `[address, address + size)` of its section. The walker
//! visits every pointer-sized slot of the dump that lies entirely inside that
//! window, in ascending address order, numbering them from zero.

use crate::metadata::hexdump::{DumpLine, WORDS_PER_SLOT};
use crate::types::Address;

/// Bytes per slot.
pub const SLOT_SIZE: u64 = 8;

/// Bytes per dump word.
const WORD_SIZE: u64 = SLOT_SIZE / WORDS_PER_SLOT as u64;

/// One pointer-sized vtable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'d>
{
    /// Position inside the vtable, from zero
    pub index: usize,
    /// Address of the slot's first byte
    pub address: Address,
    /// The two dump words, as printed
    pub words: [&'d str; WORDS_PER_SLOT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState
{
    Init,
    Scanning
    {
        line: usize,
        slot: usize,
        index: usize,
    },
    Done,
}

/// Iterator over the slots of one vtable window.
#[derive(Debug, Clone)]
pub struct SlotWalker<'d>
{
    lines: &'d [DumpLine],
    start: Address,
    end: Address,
    state: WalkState,
}

impl<'d> SlotWalker<'d>
{
    pub fn new(lines: &'d [DumpLine], start: Address, size: u64) -> Self
    {
        Self {
            lines,
            start,
            end: start.saturating_add(size),
            state: WalkState::Init,
        }
    }

    fn in_window(&self, address: Address) -> bool
    {
        address >= self.start && address.checked_add(SLOT_SIZE).is_some_and(|end| end <= self.end)
    }
}

impl<'d> Iterator for SlotWalker<'d>
{
    type Item = Slot<'d>;

    fn next(&mut self) -> Option<Self::Item>
    {
        loop {
            match self.state {
                WalkState::Init => {
                    self.state = if self.start < self.end {
                        WalkState::Scanning {
                            line: 0,
                            slot: 0,
                            index: 0,
                        }
                    } else {
                        WalkState::Done
                    };
                }
                WalkState::Scanning { line, slot, index } => {
                    let Some(dump) = self.lines.get(line) else {
                        self.state = WalkState::Done;
                        continue;
                    };

                    let first_word = slot * WORDS_PER_SLOT;
                    let Some(words) = dump.words.get(first_word..first_word + WORDS_PER_SLOT) else {
                        self.state = WalkState::Scanning {
                            line: line + 1,
                            slot: 0,
                            index,
                        };
                        continue;
                    };

                    let address = dump.address + first_word as u64 * WORD_SIZE;
                    if address >= self.end {
                        self.state = WalkState::Done;
                        continue;
                    }

                    if !self.in_window(address) {
                        self.state = WalkState::Scanning {
                            line,
                            slot: slot + 1,
                            index,
                        };
                        continue;
                    }

                    self.state = WalkState::Scanning {
                        line,
                        slot: slot + 1,
                        index: index + 1,
                    };
                    return Some(Slot {
                        index,
                        address,
                        words: [words[0].as_str(), words[1].as_str()],
                    });
                }
                WalkState::Done => return None,
            }
        }
    }
}
