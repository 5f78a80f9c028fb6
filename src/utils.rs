use crate::paginator::Offset;

pub trait SliceFromOffset<T> {
    /// Rows covered by `offset`, cut short at the end of the slice.
    fn slice(&self, offset: &Offset) -> &[T];
}

impl<T> SliceFromOffset<T> for [T] {
    fn slice(&self, offset: &Offset) -> &[T] {
        let start = offset.skip().min(self.len());
        let finish = offset.skip().saturating_add(offset.take()).min(self.len());

        &self[start..finish]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slices_are_clamped() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(items.slice(&Offset::new(1, 2)), &[2, 3]);
        assert_eq!(items.slice(&Offset::new(3, 10)), &[4, 5]);
        assert!(items.slice(&Offset::new(9, 10)).is_empty());
    }
}
