// Macros to simplify edge list declarations

/// Builds a `Vec<Edge>` from `from => to: weight` entries.
///
/// ```
/// use dagreach::edges;
///
/// let edges = edges![0 => 1: 2, 1 => 2: -4];
/// assert_eq!(edges.len(), 2);
/// ```
#[macro_export]
macro_rules! edges {
    () => {
        Vec::<$crate::graph::Edge>::new()
    };
    ($( $from:literal => $to:literal : $weight:literal ),+ $(,)?) => {
        vec![$( $crate::graph::Edge::new($from, $to, $weight) ),+]
    };
}

pub use crate::edges;

#[cfg(test)]
mod tests {
    use crate::graph::Edge;

    #[test]
    fn empty_list() {
        let list = edges![];
        assert!(list.is_empty());
    }

    #[test]
    fn negative_weights_and_trailing_comma() {
        let list = edges![
            0 => 1: -3,
            1 => 2: 7,
        ];
        assert_eq!(list, vec![Edge::new(0, 1, -3), Edge::new(1, 2, 7)]);
    }
}
