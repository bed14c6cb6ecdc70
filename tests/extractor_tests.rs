use quizgen_server::{
    models::domain::{AnswerLetter, Field, ItemType, SourceChunk},
    services::{extractor::extract, prompt_compiler::compile, segmenter::segment},
};

fn parsed(value: &str) -> Field<String> {
    Field::Parsed(value.to_string())
}

#[test]
fn test_template_round_trip() {
    let item = extract("Question: Q\nOptions:\nA) a\nB) b\nC) c\nD) d\nRéponse: B");

    assert_eq!(item.stem, parsed("Q"));
    assert_eq!(item.options, [parsed("a"), parsed("b"), parsed("c"), parsed("d")]);
    assert_eq!(item.answer, Field::Parsed(AnswerLetter::B));
    assert!(item.unparsed_fields().is_empty());
}

#[test]
fn test_missing_option_does_not_disturb_neighbours() {
    let item = extract("Question: Q\nOptions:\nA) a\nB) b\nD) d\nRéponse: A");

    assert_eq!(item.option(AnswerLetter::B), &parsed("b"));
    assert_eq!(item.option(AnswerLetter::C), &Field::Unparsed);
    assert_eq!(item.option(AnswerLetter::D), &parsed("d"));
    assert!(item.check_persistable().is_ok());
}

#[test]
fn test_answer_on_missing_option_is_not_persistable() {
    let item = extract("Question: Q\nOptions:\nA) a\nC) c\nD) d\nRéponse: b");

    assert_eq!(item.answer, Field::Parsed(AnswerLetter::B));
    assert!(item.check_persistable().is_err());
}

#[test]
fn test_garbage_never_panics() {
    for raw in ["", "\n\n", "Question:", "Options:\nRéponse:", "A) B) C) D)", "réponse: z"] {
        let item = extract(raw);
        assert_eq!(item.raw, raw);
    }
}

#[test]
fn test_segment_compile_extract_pipeline() {
    let document = "Premier paragraphe.\n\n\n   \nSecond paragraphe.\n";
    let chunks = segment(document);
    assert_eq!(
        chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
        vec!["Premier paragraphe.", "Second paragraphe."]
    );
    assert_eq!(segment(document), chunks);

    let chunk: &SourceChunk = &chunks[1];
    let prompt = compile(chunk, ItemType::FillBlank);
    assert!(prompt.contains("Second paragraphe."));
    assert!(prompt.contains("______"));
}
