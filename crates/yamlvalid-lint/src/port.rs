//! # Port Values
//!
//! A port is valid when its integer view lies strictly between 0 and
//! 65536. Integer and floating-point scalars are both accepted; floats are
//! truncated toward zero first. Anything else is invalid.

use yamlvalid_core::Node;

/// Smallest valid port number.
pub const MIN_PORT: i64 = 1;

/// Largest valid port number.
pub const MAX_PORT: i64 = 65_535;

/// Returns `true` if `node` is a numeric scalar naming a valid port.
pub fn is_valid_port(node: &Node) -> bool {
    node.as_integer()
        .is_some_and(|port| (MIN_PORT..=MAX_PORT).contains(&port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert!(!is_valid_port(&Node::Integer(0)));
        assert!(is_valid_port(&Node::Integer(1)));
        assert!(is_valid_port(&Node::Integer(65_535)));
        assert!(!is_valid_port(&Node::Integer(65_536)));
        assert!(!is_valid_port(&Node::Integer(-1)));
        assert!(!is_valid_port(&Node::Integer(70_000)));
    }

    #[test]
    fn floats_are_truncated() {
        assert!(is_valid_port(&Node::Float(8080.0)));
        assert!(is_valid_port(&Node::Float(65_535.9)));
        assert!(!is_valid_port(&Node::Float(0.9)));
        assert!(!is_valid_port(&Node::Float(65_536.0)));
        assert!(!is_valid_port(&Node::Float(f64::NAN)));
        assert!(!is_valid_port(&Node::Float(f64::INFINITY)));
    }

    #[test]
    fn non_numeric_is_invalid() {
        assert!(!is_valid_port(&Node::String("8080".to_string())));
        assert!(!is_valid_port(&Node::String("http".to_string())));
        assert!(!is_valid_port(&Node::Boolean(true)));
        assert!(!is_valid_port(&Node::Null));
        assert!(!is_valid_port(&Node::Sequence(vec![Node::Integer(80)])));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn integer_ports_match_open_interval(n in any::<i64>()) {
                prop_assert_eq!(is_valid_port(&Node::Integer(n)), 0 < n && n < 65_536);
            }

            #[test]
            fn float_ports_match_truncated_interval(f in -1.0e6f64..1.0e6f64) {
                let t = f.trunc() as i64;
                prop_assert_eq!(is_valid_port(&Node::Float(f)), 0 < t && t < 65_536);
            }

            #[test]
            fn string_ports_are_always_invalid(s in ".{0,12}") {
                prop_assert!(!is_valid_port(&Node::String(s)));
            }
        }
    }
}
