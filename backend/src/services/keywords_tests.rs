use super::{find_ai_keywords, find_ai_matches, has_ai_matches, normalize, AI_KEYWORDS};

#[test]
fn test_normalize_collapses_punctuation_runs() {
    assert_eq!(normalize("Machine-Learning, please!"), "machine learning please");
    assert_eq!(normalize("  fine-tuning.  "), "fine tuning");
    assert_eq!(normalize("GPT-3.5"), "gpt 3 5");
    assert_eq!(normalize("!!!"), "");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_matching_is_case_insensitive() {
    let keywords = find_ai_keywords("MACHINE LEARNING engineer wanted");
    assert!(keywords.contains(&"machine learning"));
}

#[test]
fn test_word_boundaries_prevent_partial_word_hits() {
    // "rag" must not match inside "storage"
    assert!(!find_ai_keywords("data storage solutions").contains(&"rag"));
    assert!(find_ai_keywords("experience with RAG pipelines").contains(&"rag"));
    // "embedding" must not fire on "embedded"
    assert!(!find_ai_keywords("embedded systems role").contains(&"embedding"));
}

#[test]
fn test_hyphenated_dictionary_entries_match() {
    let keywords = find_ai_keywords("fine-tuning models in production");
    assert!(keywords.contains(&"fine-tuning"));

    // hyphen and space variants of the input both hit the same entry
    let keywords = find_ai_keywords("fine tuning models");
    assert!(keywords.contains(&"fine-tuning"));
}

#[test]
fn test_repeated_phrase_deduplicates_to_one_match() {
    let matches = find_ai_matches("pytorch and pytorch and more pytorch");
    let count = matches.iter().filter(|m| m.keyword == "pytorch").count();
    assert_eq!(count, 1);
}

#[test]
fn test_empty_input_is_not_an_error() {
    assert!(find_ai_matches("").is_empty());
    assert!(find_ai_matches("   \n\t ").is_empty());
    assert!(!has_ai_matches(""));
}

#[test]
fn test_result_order_is_dictionary_order() {
    // "nlp" comes after "machine learning" in the dictionary, regardless of
    // position in the text.
    let keywords = find_ai_keywords("NLP work plus machine learning");
    let ml_pos = keywords.iter().position(|&k| k == "machine learning").unwrap();
    let nlp_pos = keywords.iter().position(|&k| k == "nlp").unwrap();
    assert!(ml_pos < nlp_pos);
}

#[test]
fn test_bare_ai_token_is_not_in_the_dictionary() {
    assert!(!AI_KEYWORDS.contains(&"ai"));
    assert!(find_ai_matches("ai strategy consultant").is_empty());
}

#[test]
fn test_slash_and_dot_phrases_match_normalized_forms() {
    assert!(find_ai_keywords("AI/ML practitioner").contains(&"ai/ml"));
    assert!(find_ai_keywords("worked with gpt-3.5 api").contains(&"gpt-3.5"));
}

#[test]
fn test_match_index_points_into_normalized_text() {
    let matches = find_ai_matches("llm");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].keyword, "llm");
    assert_eq!(matches[0].index, Some(0));
}

#[test]
fn test_multiple_distinct_keywords_in_one_blob() {
    let keywords =
        find_ai_keywords("Deep learning role: PyTorch, TensorFlow, and computer vision.");
    assert!(keywords.contains(&"deep learning"));
    assert!(keywords.contains(&"pytorch"));
    assert!(keywords.contains(&"tensorflow"));
    assert!(keywords.contains(&"computer vision"));
}
