/// Split text into words: every maximal run of non-whitespace characters.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
