use unicode_segmentation::UnicodeSegmentation;

const ENGLISH_STOP_WORDS: &[&str] = &[
	"a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
	"are", "aren", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
	"between", "both", "but", "by", "can", "couldn", "couldn't", "d", "did", "didn", "didn't",
	"do", "does", "doesn", "doesn't", "doing", "don", "don't", "down", "during", "each", "few",
	"for", "from", "further", "had", "hadn", "hadn't", "has", "hasn", "hasn't", "have", "haven",
	"haven't", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
	"i", "if", "in", "into", "is", "isn", "isn't", "it", "it's", "its", "itself", "just", "ll",
	"m", "ma", "me", "mightn", "mightn't", "more", "most", "mustn", "mustn't", "my", "myself",
	"needn", "needn't", "no", "nor", "not", "now", "o", "of", "off", "on", "once", "only", "or",
	"other", "our", "ours", "ourselves", "out", "over", "own", "re", "s", "same", "shan",
	"shan't", "she", "she's", "should", "should've", "shouldn", "shouldn't", "so", "some", "such",
	"t", "than", "that", "that'll", "the", "their", "theirs", "them", "themselves", "then",
	"there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
	"ve", "very", "was", "wasn", "wasn't", "we", "were", "weren", "weren't", "what", "when",
	"where", "which", "while", "who", "whom", "why", "will", "with", "won", "won't", "wouldn",
	"wouldn't", "y", "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself",
	"yourselves",
];

/// Keyword candidates for the lexical half of hybrid search.
pub fn process_keywords(query: &str, edit_keyword_query: bool) -> Vec<String> {
	let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();

	if edit_keyword_query { remove_stop_words_and_punctuation(&terms) } else { terms }
}

/// Falls back to the word tokens when every token is a stop word or punctuation.
pub fn remove_stop_words_and_punctuation(terms: &[String]) -> Vec<String> {
	let joined = terms.join(" ");
	let tokens: Vec<&str> =
		joined.split_word_bounds().filter(|token| !token.trim().is_empty()).collect();
	let trimmed: Vec<String> = tokens
		.iter()
		.filter(|token| !is_stop_word(token) && !is_punctuation(token))
		.map(|token| token.to_string())
		.collect();

	if trimmed.is_empty() { tokens.into_iter().map(str::to_string).collect() } else { trimmed }
}

fn is_stop_word(token: &str) -> bool {
	let folded = token.to_lowercase().replace('\u{2019}', "'");

	ENGLISH_STOP_WORDS.binary_search(&folded.as_str()).is_ok()
}

fn is_punctuation(token: &str) -> bool {
	token.chars().all(|ch| !ch.is_alphanumeric())
}
