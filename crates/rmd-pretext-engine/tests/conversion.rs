use pretty_assertions::assert_eq;
use rmd_pretext_engine::{
    BlockNode, ChapterOptions, ConvertOptions, SectionKind, attach_outputs, convert,
    convert_file, parse_outputs, to_pretext, write_document,
};
use tempfile::TempDir;

fn body(xml: &str) -> &str {
    xml.split_once("\n\n").map(|(_, rest)| rest).unwrap()
}

#[test]
fn fixed_chapter_wraps_every_heading() {
    let options = ConvertOptions {
        chapter: Some(ChapterOptions {
            id: Some("ch3-intro-r".into()),
            title: "Getting started with R".into(),
        }),
        ..ConvertOptions::default()
    };

    let conversion = convert("# Ignored\n\nIntro.\n\n## First\n\nText.\n", &options);

    assert_eq!(
        body(&conversion.to_pretext()),
        r#"<chapter xml:id="ch3-intro-r">
  <title>Getting started with R</title>
  <p>Intro.</p>
  <section>
    <title>First</title>
    <p>Text.</p>
  </section>
</chapter>
"#
    );
}

#[test]
fn front_matter_is_skipped_only_at_the_start() {
    let source = "---\ntitle: x\n...\nBody.\n\n---\n";
    let conversion = convert(source, &ConvertOptions::default());
    let blocks: Vec<_> = conversion
        .document
        .children
        .iter()
        .filter_map(|n| n.as_block())
        .collect();

    assert_eq!(
        blocks,
        vec![
            &BlockNode::Paragraph("Body.".into()),
            &BlockNode::Paragraph("---".into()),
        ]
    );
}

#[test]
fn front_matter_can_be_kept() {
    let options = ConvertOptions {
        skip_front_matter: false,
        ..ConvertOptions::default()
    };
    let conversion = convert("---\ntitle: x\n---\n", &options);

    assert_eq!(
        conversion.document.children[0].as_block(),
        Some(&BlockNode::Paragraph("--- title: x ---".into()))
    );
}

#[test]
fn convert_then_attach_outputs() {
    let source = "## Means\n\n```{r}\nx <- c(1, 2)\nmean(x)\n```\n\nDone.\n";
    let mut conversion = convert(source, &ConvertOptions::default());
    let outputs = parse_outputs(
        r###"
[[outputs]]
code = "mean(x)"
output = "## [1] 1.5"
"###,
    )
    .unwrap();

    let report = attach_outputs(&mut conversion.document, &outputs);

    assert_eq!(report.attached, 1);
    assert_eq!(
        body(&to_pretext(&conversion.document)),
        r#"<section>
  <title>Means</title>
  <program language="r">
    <input><![CDATA[
x <- c(1, 2)
mean(x)
]]></input>
  </program>
  <console>
    <output><![CDATA[
## [1] 1.5
]]></output>
  </console>
  <p>Done.</p>
</section>
"#
    );
}

#[test]
fn file_round_trip_through_disk() {
    // Given a chapter on disk
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ch1.Rmd");
    std::fs::write(&input, "# One {#one}\n\nSee \\@ref(one).\n").unwrap();

    // When converting it and writing the result
    let conversion = convert_file(&input, &ConvertOptions::default()).unwrap();
    let output = dir.path().join("out/ch1.ptx");
    write_document(&output, &conversion.to_pretext()).unwrap();

    // Then the written document holds the chapter
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.contains(r#"<chapter xml:id="one">"#));
    assert!(written.contains(r#"<p>See <xref ref="one"/>.</p>"#));
}

#[test]
fn list_kind_change_splits_lists() {
    let conversion = convert("- a\n- b\n1. c\n", &ConvertOptions::default());
    let kinds: Vec<bool> = conversion
        .document
        .children
        .iter()
        .filter_map(|n| match n.as_block() {
            Some(BlockNode::List { ordered, .. }) => Some(*ordered),
            _ => None,
        })
        .collect();

    assert_eq!(kinds, vec![false, true]);
}

#[test]
fn nesting_follows_heading_levels() {
    let conversion = convert(
        "# Ch\n## A\n### A1\n#### A1a\n## B\n",
        &ConvertOptions::default(),
    );
    let chapter = conversion.document.sections().next().unwrap();
    assert_eq!(chapter.kind, SectionKind::Chapter);

    let sections: Vec<_> = chapter.sections().map(|s| s.title.as_str()).collect();
    assert_eq!(sections, vec!["A", "B"]);

    let a1 = chapter.sections().next().unwrap().sections().next().unwrap();
    assert_eq!(a1.kind, SectionKind::Subsection);
    assert_eq!(a1.sections().next().unwrap().kind, SectionKind::Subsubsection);
    assert!(conversion.diagnostics.is_clean());
}

#[test]
fn display_math_opened_on_its_first_line_keeps_following_blocks() {
    let source = "$$\\begin{aligned}\na &= b\n\\end{aligned}\n$$\n\nNext paragraph *here*.\n\n## Later section\n\nMore text.\n";
    let conversion = convert(source, &ConvertOptions::default());
    let children = &conversion.document.children;

    assert_eq!(
        children[0].as_block(),
        Some(&BlockNode::MathBlock(
            "\\begin{aligned}\na &= b\n\\end{aligned}".into()
        ))
    );
    assert_eq!(
        children[1].as_block(),
        Some(&BlockNode::Paragraph("Next paragraph <em>here</em>.".into()))
    );
    let section = children[2].as_structural().unwrap();
    assert_eq!(section.title, "Later section");
    assert!(conversion.diagnostics.is_clean());
}

#[test]
fn unknown_entities_and_arithmetic_stay_literal() {
    let conversion = convert(
        "Use&nbsp;this and R&D; too. Compute 3*4 and 5*6 by hand.\n",
        &ConvertOptions::default(),
    );

    assert_eq!(
        conversion.document.children[0].as_block(),
        Some(&BlockNode::Paragraph(
            "Use&amp;nbsp;this and R&amp;D; too. Compute 3*4 and 5*6 by hand.".into()
        ))
    );
}
