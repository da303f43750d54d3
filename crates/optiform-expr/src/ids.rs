macro_rules! define_id_type {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            pub fn new(value: u32) -> Self {
                Self(value)
            }

            pub fn inner(self) -> u32 {
                self.0
            }

            /// Position of this id in dense, column- or row-ordered storage.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id_type!(VariableId, "v");
define_id_type!(ConstraintId, "c");

#[cfg(test)]
mod tests {
    use super::{ConstraintId, VariableId};

    #[test]
    fn ids_expose_dense_index() {
        assert_eq!(VariableId::new(7).index(), 7);
        assert_eq!(ConstraintId::new(11).inner(), 11);
    }

    #[test]
    fn display_uses_kind_prefix() {
        assert_eq!(VariableId::new(3).to_string(), "v3");
        assert_eq!(ConstraintId::new(0).to_string(), "c0");
    }
}
