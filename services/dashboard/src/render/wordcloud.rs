use serde::Serialize;
use std::collections::HashMap;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "for", "from", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
    "most", "my", "myself", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

const PAD: f64 = 4.0;
const MIN_FONT: f64 = 10.0;
const MAX_FONT: f64 = 48.0;
/// Rough advance width of one glyph relative to the font size.
const GLYPH_WIDTH: f64 = 0.6;

#[derive(Clone, Copy, Debug)]
pub struct WordCloudStyle {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub palette: &'static [&'static str],
    pub max_words: usize,
}

pub const POSITIVE_STYLE: WordCloudStyle = WordCloudStyle {
    width: 400,
    height: 200,
    background: "white",
    palette: &["#1b7837", "#2166ac", "#5aae61", "#4393c3", "#762a83"],
    max_words: 60,
};

pub const NEGATIVE_STYLE: WordCloudStyle = WordCloudStyle {
    width: 400,
    height: 200,
    background: "black",
    palette: &["#fdae61", "#f46d43", "#fee08b", "#d73027", "#f7f7f7"],
    max_words: 60,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: String,
}

/// Word-frequency picture of one polarity corpus. An empty corpus is a blank canvas.
#[derive(Clone, Debug, Serialize)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
}

/// Lowercased word counts without stop words, most frequent first, ties alphabetical.
pub fn word_frequencies(corpus: &str, max_words: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in textmodel::tokenize(corpus, true) {
        if !STOP_WORDS.contains(&token.as_str()) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs.truncate(max_words);
    freqs
}

impl WordCloud {
    pub fn generate(corpus: &str, style: &WordCloudStyle) -> Self {
        let width = f64::from(style.width);
        let height = f64::from(style.height);
        let freqs = word_frequencies(corpus, style.max_words);
        let top = freqs.first().map_or(1, |(_, c)| *c) as f64;

        // flow layout: fill rows left to right, largest words first
        let mut rows: Vec<Vec<(String, f64, f64)>> = Vec::new();
        let mut row: Vec<(String, f64, f64)> = Vec::new();
        let mut row_width = PAD;
        for (word, count) in freqs {
            let chars = word.chars().count() as f64;
            let mut size = MIN_FONT + (MAX_FONT - MIN_FONT) * (count as f64 / top);
            let fit = (width - 2.0 * PAD) / (chars * GLYPH_WIDTH);
            if size > fit {
                size = fit;
            }
            if size < MIN_FONT {
                continue;
            }
            let w = chars * GLYPH_WIDTH * size;
            if row_width + w + PAD > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = PAD;
            }
            row.push((word, size, w));
            row_width += w + PAD;
        }
        if !row.is_empty() {
            rows.push(row);
        }

        let mut words = Vec::new();
        let mut top_y = PAD;
        for row in rows {
            let row_height = row.iter().map(|(_, s, _)| *s).fold(0.0, f64::max);
            if top_y + row_height > height - PAD {
                break;
            }
            let mut x = PAD;
            for (word, size, w) in row {
                words.push(PlacedWord {
                    color: style.palette[words.len() % style.palette.len()].to_string(),
                    text: word,
                    x: round1(x),
                    y: round1(top_y + row_height * 0.85),
                    font_size: round1(size),
                });
                x += w + PAD;
            }
            top_y += row_height + PAD;
        }

        Self {
            width: style.width,
            height: style.height,
            background: style.background.to_string(),
            words,
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_skip_stop_words_and_sort() {
        let f = word_frequencies("The food was great, great service and GREAT food", 10);
        assert_eq!(
            f,
            vec![("great".to_string(), 3), ("food".to_string(), 2), ("service".to_string(), 1)]
        );
    }

    #[test]
    fn empty_corpus_is_blank_canvas() {
        let cloud = WordCloud::generate("", &NEGATIVE_STYLE);
        assert!(cloud.words.is_empty());
        assert_eq!((cloud.width, cloud.height), (400, 200));
        assert_eq!(cloud.background, "black");
    }

    #[test]
    fn stop_words_only_is_blank_canvas() {
        assert!(WordCloud::generate("the and of a", &POSITIVE_STYLE).words.is_empty());
    }

    #[test]
    fn words_stay_inside_canvas() {
        let corpus = (0..200).map(|i| format!("word{i} delicious")).collect::<Vec<_>>().join(" ");
        let cloud = WordCloud::generate(&corpus, &POSITIVE_STYLE);
        assert_eq!(cloud.words[0].text, "delicious");
        assert_eq!(cloud.words[0].font_size, MAX_FONT);
        for w in &cloud.words {
            let right = w.x + w.text.chars().count() as f64 * GLYPH_WIDTH * w.font_size;
            assert!(right <= 400.0 + 0.5, "{w:?}");
            assert!(w.y <= 200.0, "{w:?}");
        }
    }

    #[test]
    fn overlong_word_is_shrunk_to_fit() {
        let cloud = WordCloud::generate("supercalifragilisticexpialidocious", &POSITIVE_STYLE);
        assert_eq!(cloud.words.len(), 1);
        assert!(cloud.words[0].font_size < MAX_FONT);
    }
}
