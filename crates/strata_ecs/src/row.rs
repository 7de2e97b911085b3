//! Row tuples and their struct-of-arrays column storage.
//!
//! A [`Row`] is the fixed, ordered list of component types one store
//! holds, expressed as a tuple: `(f32, f32)` for a two-field position
//! store, `(String,)` for a name store, `()` for a membership-only tag
//! store. The trait binds each tuple to its column group (`Columns`, one
//! `Vec` per element) and to borrowed whole-row views (`Ref`/`Mut`).
//!
//! Columns grow in lockstep to the highest slot ever written and are never
//! shrunk or compacted. Retired slots keep their last payload; only the
//! store's identifier column marks them dead.

/// A fixed tuple of component types stored as parallel columns.
///
/// Implemented for tuples of arity 0 through 8. Elements must be
/// `Default` because column growth fills the gap up to a newly allocated
/// slot with default values.
pub trait Row: 'static {
    /// The column group: one `Vec` per tuple element, index-aligned.
    type Columns: Default;

    /// Borrowed view of one row, one `&T` per element.
    type Ref<'a>;

    /// Mutable view of one row, one `&mut T` per element.
    type Mut<'a>;

    /// Write this row into `slot`, growing every column as needed.
    fn write(self, columns: &mut Self::Columns, slot: usize);

    /// Borrow the row at `slot`. The slot must have been written.
    fn read(columns: &Self::Columns, slot: usize) -> Self::Ref<'_>;

    /// Mutably borrow the row at `slot`. The slot must have been written.
    fn read_mut(columns: &mut Self::Columns, slot: usize) -> Self::Mut<'_>;

    /// Truncate every column to empty.
    fn clear(columns: &mut Self::Columns);
}

/// The empty row: a tag store records membership and nothing else.
impl Row for () {
    type Columns = ();
    type Ref<'a> = ();
    type Mut<'a> = ();

    fn write(self, _columns: &mut (), _slot: usize) {}

    fn read(_columns: &(), _slot: usize) -> Self::Ref<'_> {}

    fn read_mut(_columns: &mut (), _slot: usize) -> Self::Mut<'_> {}

    fn clear(_columns: &mut ()) {}
}

macro_rules! impl_row {
    ($(($ty:ident, $idx:tt)),+) => {
        impl<$($ty: 'static + Default),+> Row for ($($ty,)+) {
            type Columns = ($(Vec<$ty>,)+);
            type Ref<'a> = ($(&'a $ty,)+);
            type Mut<'a> = ($(&'a mut $ty,)+);

            fn write(self, columns: &mut Self::Columns, slot: usize) {
                $(
                    if columns.$idx.len() <= slot {
                        columns.$idx.resize_with(slot + 1, $ty::default);
                    }
                    columns.$idx[slot] = self.$idx;
                )+
            }

            fn read(columns: &Self::Columns, slot: usize) -> Self::Ref<'_> {
                ($(&columns.$idx[slot],)+)
            }

            fn read_mut(columns: &mut Self::Columns, slot: usize) -> Self::Mut<'_> {
                ($(&mut columns.$idx[slot],)+)
            }

            fn clear(columns: &mut Self::Columns) {
                $(columns.$idx.clear();)+
            }
        }
    };
}

impl_row!((A, 0));
impl_row!((A, 0), (B, 1));
impl_row!((A, 0), (B, 1), (C, 2));
impl_row!((A, 0), (B, 1), (C, 2), (D, 3));
impl_row!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
impl_row!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
impl_row!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6));
impl_row!((A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6), (H, 7));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_grows_columns_in_lockstep() {
        let mut columns: <(i32, String) as Row>::Columns = Default::default();
        Row::write((7, "seven".to_string()), &mut columns, 3);
        assert_eq!(columns.0.len(), 4);
        assert_eq!(columns.1.len(), 4);
        assert_eq!(columns.0[3], 7);
        assert_eq!(columns.1[3], "seven");
        // Gap slots hold defaults.
        assert_eq!(columns.0[0], 0);
        assert_eq!(columns.1[0], "");
    }

    #[test]
    fn test_read_and_read_mut() {
        let mut columns: <(i32, f32) as Row>::Columns = Default::default();
        Row::write((1, 2.0f32), &mut columns, 0);
        {
            let (a, b) = <(i32, f32) as Row>::read_mut(&mut columns, 0);
            *a += 10;
            *b *= 2.0;
        }
        let (a, b) = <(i32, f32) as Row>::read(&columns, 0);
        assert_eq!(*a, 11);
        assert_eq!(*b, 4.0);
    }

    #[test]
    fn test_clear_truncates() {
        let mut columns: <(u8,) as Row>::Columns = Default::default();
        Row::write((5u8,), &mut columns, 2);
        <(u8,) as Row>::clear(&mut columns);
        assert!(columns.0.is_empty());
    }
}
