/// A reference to a position in a descriptor string.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Src {
    pub offset: usize,
    pub len: usize,
}

impl Src {
    pub fn new(offset: usize, len: usize) -> Self {
        Src { offset, len }
    }

    /// Locate `part`, which must be a subslice of `whole`, within `whole`.
    ///
    /// This only uses pointer arithmetic, not string search, so repeated substrings (two fields
    /// both named `op`, say) resolve to the occurrence that was actually sliced out. Returns None
    /// if `part` does not lie within `whole`.
    pub fn of(part: &str, whole: &str) -> Option<Src> {
        let whole_addr = whole.as_ptr() as usize;
        let part_addr = part.as_ptr() as usize;
        if part_addr < whole_addr || part_addr + part.len() > whole_addr + whole.len() {
            return None;
        }
        Some(Src {
            offset: part_addr - whole_addr,
            len: part.len(),
        })
    }

    /// A zero-length Src just past the end of `whole`, for "expected more" errors.
    pub fn end_of(whole: &str) -> Src {
        Src {
            offset: whole.len(),
            len: 0,
        }
    }

    /// The text this Src covers in `whole`.
    pub fn slice<'s>(&self, whole: &'s str) -> &'s str {
        &whole[self.offset..self.offset + self.len]
    }
}
