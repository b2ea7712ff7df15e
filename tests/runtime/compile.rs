//! Whole compile runs.

use std::fs;
use std::path::PathBuf;

use declc_foundation::{ErrorKind, Result};
use declc_language::{Constructor, Declaration};
use declc_render::{RenderConfig, RenderContext};
use declc_runtime::{CompileConfig, Compiler, PathResolver};

use crate::{project, write};

const MODEL: &str = "namespace Acme\\Shop;
    data Sku = String deriving (ToScalar, FromScalar);
    data Item = Item { Sku $sku, int $quantity } deriving (ToArray, FromArray, Equals)
        where quantity < 1 => 'Quantity must be positive';";

const EVENTS: &str = "namespace Acme\\Shop\\Events;
    data CartId = CartId deriving (Uuid);
    data ItemAdded = ItemAdded { CartId $cart, \\Acme\\Shop\\Item $item } deriving (AggregateChanged);
    marker CartEvent;";

#[test]
fn compiles_a_project_tree() {
    let dir = project(&[("decl/model.decl", MODEL), ("decl/events/cart.decl", EVENTS)]);
    let out = dir.path().join("src");
    let compiler = Compiler::new(
        CompileConfig::new(dir.path().join("decl"), &out).with_prefix("Acme\\Shop"),
    );

    let summary = compiler.run().unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.declarations, 5);
    assert_eq!(
        summary.written,
        vec![
            out.join("Events/CartId.php"),
            out.join("Events/ItemAdded.php"),
            out.join("Events/CartEvent.php"),
            out.join("Sku.php"),
            out.join("Item.php"),
        ]
    );

    let item = fs::read_to_string(out.join("Item.php")).unwrap();
    assert!(item.starts_with("<?php\n"));
    assert!(item.contains("namespace Acme\\Shop;"));
    assert!(item.contains("'sku' => $this->sku->toScalar(),"));

    let event = fs::read_to_string(out.join("Events/ItemAdded.php")).unwrap();
    assert!(event.contains("return self::occur($cart->toString(), ["));
    assert!(event.contains("'item' => $item->toArray(),"));
    assert!(event.contains("return \\Acme\\Shop\\Item::fromArray($this->payload['item']);"));
}

#[test]
fn rerunning_overwrites_previous_output() {
    let dir = project(&[("decl/model.decl", MODEL)]);
    let out = dir.path().join("src");
    let config = CompileConfig::new(dir.path().join("decl"), &out).with_prefix("Acme\\Shop");

    Compiler::new(config.clone()).run().unwrap();
    write(&out.join("Item.php"), "stale");
    Compiler::new(config).run().unwrap();

    assert!(fs::read_to_string(out.join("Item.php")).unwrap().contains("final class Item"));
}

#[test]
fn render_config_reaches_the_output() {
    let dir = project(&[("decl/model.decl", MODEL)]);
    let out = dir.path().join("src");
    let config = CompileConfig::new(dir.path().join("decl"), &out)
        .with_prefix("Acme\\Shop")
        .with_render(RenderConfig::default().with_strict_types(false).with_header(""));

    Compiler::new(config).run().unwrap();
    let sku = fs::read_to_string(out.join("Sku.php")).unwrap();
    assert!(sku.starts_with("<?php\n\nnamespace Acme\\Shop;\n"));
}

#[test]
fn output_outside_the_prefix_fails_before_writing() {
    let dir = project(&[("decl/model.decl", MODEL), ("decl/other.decl", "namespace Other; data X = X { int $x };")]);
    let out = dir.path().join("src");
    let compiler = Compiler::new(
        CompileConfig::new(dir.path().join("decl"), &out).with_prefix("Acme\\Shop"),
    );

    let err = compiler.run().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDeclaration { ref declaration, .. } if declaration == "Other\\X"));
    assert!(!out.exists());
}

#[test]
fn invalid_declarations_stop_the_run() {
    let dir = project(&[("decl/bad.decl", "namespace Acme\\Shop; data Id = Id { int $a, int $b } deriving (Uuid);")]);
    let out = dir.path().join("src");
    let err = Compiler::new(CompileConfig::new(dir.path().join("decl"), &out))
        .run()
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidDeriving { .. }));
    assert!(!out.exists());
}

#[test]
fn parse_errors_carry_the_file() {
    let dir = project(&[("decl/broken.decl", "namespace Acme;\ndata = ;")]);
    let broken = dir.path().join("decl").join("broken.decl");
    let err = Compiler::new(CompileConfig::new(&broken, dir.path().join("src")))
        .run()
        .unwrap_err();

    match err.kind {
        ErrorKind::ParseError { source_id, line, .. } => {
            assert_eq!(source_id, broken.display().to_string());
            assert_eq!(line, 2);
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// Writes every class flat into one directory.
#[derive(Debug)]
struct FlatResolver(PathBuf);

impl PathResolver for FlatResolver {
    fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        Ok(self.0.join(format!("{}.php", identifier.replace('\\', "_"))))
    }
}

#[test]
fn custom_resolver() {
    let dir = project(&[("decl/model.decl", MODEL)]);
    let out = dir.path().join("flat");
    let compiler = Compiler::new(CompileConfig::new(dir.path().join("decl"), &out))
        .with_resolver(FlatResolver(out.clone()));

    let summary = compiler.run().unwrap();
    assert_eq!(
        summary.written,
        vec![out.join("Acme_Shop_Sku.php"), out.join("Acme_Shop_Item.php")]
    );
}

fn shop_header(
    _: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok("// Acme Shop".to_string())
}

#[test]
fn custom_builders_through_the_compiler() {
    let dir = project(&[("decl/model.decl", MODEL)]);
    let out = dir.path().join("src");
    let mut compiler = Compiler::new(
        CompileConfig::new(dir.path().join("decl"), &out).with_prefix("Acme\\Shop"),
    );
    compiler.renderer_mut().builders_mut().prepend("header", shop_header);

    compiler.run().unwrap();
    assert!(fs::read_to_string(out.join("Sku.php")).unwrap().contains("// Acme Shop"));
}
