use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default English/Russian preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds full-width and compatibility forms
        let text: String = text.nfkc().collect();

        text.replace(['\r', '\u{feff}'], "").to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
