/// Line-oriented view of one OCR result.
///
/// Line order is kept as printed; positional heuristics ("the line above
/// the DOB label") depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLines {
    lines: Vec<String>,
    lowered: Vec<String>,
    text: String,
    text_lower: String,
}

impl NormalizedLines {
    pub fn new(raw: &str) -> Self {
        let lines: Vec<String> = raw
            .split(|c| c == '\n' || c == '\r')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        let lowered: Vec<String> = lines.iter().map(|line| line.to_lowercase()).collect();
        let text = lines.join("\n");
        let text_lower = lowered.join("\n");

        NormalizedLines {
            lines,
            lowered,
            text,
            text_lower,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lower(&self, index: usize) -> Option<&str> {
        self.lowered.get(index).map(String::as_str)
    }

    /// Original-case text, one kept line per `\n`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_lower(&self) -> &str {
        &self.text_lower
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pairs of (original, lower-cased) lines with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.lines
            .iter()
            .zip(self.lowered.iter())
            .enumerate()
            .map(|(i, (line, lower))| (i, line.as_str(), lower.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_lines_and_keeps_order() {
        let raw = "  Government of India \n\n   \r\nRohan Kumar\r\nDOB: 05/06/1990\rMale\n";
        let lines = NormalizedLines::new(raw);
        assert_eq!(
            lines.lines(),
            &["Government of India", "Rohan Kumar", "DOB: 05/06/1990", "Male"]
        );
        assert_eq!(lines.lower(3), Some("male"));
        assert_eq!(lines.text_lower(), "government of india\nrohan kumar\ndob: 05/06/1990\nmale");
    }

    #[test]
    fn test_empty_input() {
        assert!(NormalizedLines::new("").is_empty());
        assert!(NormalizedLines::new(" \n\t\n").is_empty());
    }

    #[test]
    fn test_line_count_bounded_by_segments() {
        let samples = ["a\nb\n\nc", "\n\n\n", "single", "x\r\ny\r\n\r\n", "  \n z  \n"];
        for raw in samples {
            let lines = NormalizedLines::new(raw);
            assert!(lines.len() <= raw.split('\n').count());
            assert!(lines.lines().iter().all(|l| !l.trim().is_empty()));
        }
    }
}
