pub mod ordered_map;

pub use ordered_map::{IntoIter, Iter, IterMut, Keys, OrderedMap, Values, ValuesMut};
