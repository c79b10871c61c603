//! Integration tests for the parsing module.
//!
//! Fixtures (.Rmd) and their PreTeXt snapshots (.snap) are co-located in
//! `fixtures/`.


use pretty_assertions::assert_eq;

use crate::{
    models::{BlockNode, SectionKind},
    options::ConvertOptions,
    parsing::{Conversion, Diagnostics, convert},
};

// Fixture-based snapshot tests

#[test]
fn fixture_sections_and_blocks() {
    let conversion = assert_fixture("sections_and_blocks");
    assert!(conversion.diagnostics.is_clean());
}

#[test]
fn fixture_code_math_figures() {
    let conversion = assert_fixture("code_math_figures");
    assert_eq!(
        conversion.diagnostics,
        Diagnostics {
            ambiguous_delimiters: 1,
            ..Diagnostics::default()
        }
    );
}

#[test]
fn fixture_malformed_and_gaps() {
    let conversion = assert_fixture("malformed_and_gaps");
    assert_eq!(
        conversion.diagnostics,
        Diagnostics {
            malformed_headings: 2,
            depth_gaps: 2,
            unterminated_fences: 1,
            ambiguous_delimiters: 0,
        }
    );
}

fn assert_fixture(name: &str) -> Conversion {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let source = std::fs::read_to_string(format!("{fixtures_dir}/{name}.Rmd")).unwrap();

    let conversion = convert(&source, &ConvertOptions::default());
    let xml = conversion.to_pretext();
    invariants::check(&conversion.document, &xml);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, xml);
    });
    conversion
}

// Invariant tests

/// Headings climbing back up close everything deeper first.
#[test]
fn sibling_sections_after_deeper_ones() {
    let conversion = convert("## A\n### B\n## C\n", &ConvertOptions::default());
    let top: Vec<_> = conversion.document.sections().collect();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].title, "A");
    assert_eq!(top[1].title, "C");
    let nested: Vec<_> = top[0].sections().collect();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].kind, SectionKind::Subsection);
    assert_eq!(top[1].children.len(), 0);
}

#[test]
fn heading_inside_fence_is_code() {
    let conversion = convert("```{r}\n# comment\n```\n", &ConvertOptions::default());
    assert_eq!(conversion.document.structural_count(), 0);
    assert_eq!(conversion.document.block_count(), 1);
}

#[test]
fn blocks_before_first_heading_stay_at_top_level() {
    let conversion = convert("Preface text.\n\n# One\n\nBody.\n", &ConvertOptions::default());
    let children = &conversion.document.children;

    assert_eq!(
        children[0].as_block(),
        Some(&BlockNode::Paragraph("Preface text.".into()))
    );
    assert!(children[1].as_structural().is_some());
}

#[test]
fn every_fixture_output_is_well_formed() {
    for source in [
        "# A\n\n> q -- r\n\n- x\n1. y\n",
        "#### deep\n\n$$\nx < y\n$$\n",
        "```\nunclosed\n",
        "Tricky \u{E000}C0\u{E001} text with `code` and $m$.",
    ] {
        let conversion = convert(source, &ConvertOptions::default());
        invariants::check(&conversion.document, &conversion.to_pretext());
    }
}
