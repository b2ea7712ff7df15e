//! PSR-4 output paths.

use std::path::PathBuf;

use declc_foundation::ErrorKind;
use declc_runtime::{PathResolver, Psr4Resolver};

#[test]
fn segments_become_directories() {
    let resolver = Psr4Resolver::new("Acme\\Shop", "/out");
    assert_eq!(
        resolver.resolve("Acme\\Shop\\Billing\\Tax\\Rate").unwrap(),
        PathBuf::from("/out/Billing/Tax/Rate.php")
    );
    assert_eq!(
        resolver.resolve("\\Acme\\Shop\\Cart").unwrap(),
        PathBuf::from("/out/Cart.php")
    );
}

#[test]
fn classes_outside_the_prefix_are_rejected() {
    let resolver = Psr4Resolver::new("Acme", "/out");
    for identifier in ["Other\\Cart", "AcmeCorp\\Cart", "Acme"] {
        let err = resolver.resolve(identifier).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::InvalidDeclaration { .. }),
            "{identifier} should be rejected"
        );
    }
}
