use std::cmp;

/// Small text buffer backing the dialog's text fields.
///
/// Columns count characters, not bytes. A single-line editor ignores newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub multi_line: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            multi_line: false,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            multi_line: true,
            ..Self::new()
        }
    }

    /// Editor pre-filled with `content`, cursor at the end
    pub fn from_string(content: &str, multi_line: bool) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else if multi_line {
            content.lines().map(|s| s.to_string()).collect()
        } else {
            vec![content.replace('\n', " ")]
        };
        let cursor_line = lines.len().saturating_sub(1);
        let cursor_col = lines.last().map(|l| l.chars().count()).unwrap_or(0);
        Self {
            lines,
            cursor_line,
            cursor_col,
            multi_line,
        }
    }

    fn current_len(&self) -> usize {
        self.lines
            .get(self.cursor_line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = cmp::min(self.cursor_line, self.lines.len() - 1);
        self.cursor_col = cmp::min(self.cursor_col, self.current_len());
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.clamp_cursor();
        let line = &mut self.lines[self.cursor_line];
        let byte_idx = char_to_byte(line, self.cursor_col);
        line.insert(byte_idx, ch);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        if !self.multi_line {
            return;
        }
        self.clamp_cursor();
        let line = &mut self.lines[self.cursor_line];
        let byte_idx = char_to_byte(line, self.cursor_col);
        let rest = line.split_off(byte_idx);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Backspace: delete the character before the cursor, joining lines at column 0
    pub fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let byte_idx = char_to_byte(line, self.cursor_col - 1);
            line.remove(byte_idx);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.current_len();
            self.lines[self.cursor_line].push_str(&current);
        }
    }

    /// Delete: remove the character under the cursor
    pub fn delete_forward(&mut self) {
        self.clamp_cursor();
        if self.cursor_col < self.current_len() {
            let line = &mut self.lines[self.cursor_line];
            let byte_idx = char_to_byte(line, self.cursor_col);
            line.remove(byte_idx);
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_len();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.current_len() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = cmp::min(self.cursor_col, self.current_len());
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = cmp::min(self.cursor_col, self.current_len());
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.current_len();
    }

    /// Jump to the start of the previous word on the current line
    pub fn move_cursor_word_left(&mut self) {
        let chars: Vec<char> = self.lines[self.cursor_line].chars().collect();
        let mut col = cmp::min(self.cursor_col, chars.len());
        while col > 0 && !is_word_char(chars[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(chars[col - 1]) {
            col -= 1;
        }
        self.cursor_col = col;
    }

    /// Jump past the end of the next word on the current line
    pub fn move_cursor_word_right(&mut self) {
        let chars: Vec<char> = self.lines[self.cursor_line].chars().collect();
        let mut col = cmp::min(self.cursor_col, chars.len());
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }
        self.cursor_col = col;
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_text(&mut self, content: &str) {
        *self = Self::from_string(content, self.multi_line);
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_and_deletes_multibyte_chars() {
        let mut e = Editor::new();
        for c in "Ler capítulo".chars() {
            e.insert_char(c);
        }
        assert_eq!(e.text(), "Ler capítulo");
        e.move_cursor_word_left();
        assert_eq!(e.cursor_col, 4);
        e.delete_char();
        assert_eq!(e.text(), "Lercapítulo");
        e.move_cursor_end();
        e.delete_char();
        assert_eq!(e.text(), "Lercapítul");
    }

    #[test]
    fn single_line_ignores_newlines() {
        let mut e = Editor::from_string("abc", false);
        e.insert_char('\n');
        assert_eq!(e.lines.len(), 1);
        assert_eq!(e.text(), "abc");
    }

    #[test]
    fn multi_line_splits_and_joins() {
        let mut e = Editor::from_string("hello world", true);
        e.move_cursor_home();
        e.move_cursor_word_right();
        e.insert_newline();
        assert_eq!(e.lines, vec!["hello".to_string(), " world".to_string()]);
        e.delete_char();
        assert_eq!(e.text(), "hello world");
        e.move_cursor_home();
        e.delete_forward();
        assert_eq!(e.text(), "ello world");
    }

    #[test]
    fn blank_detection_trims() {
        assert!(Editor::from_string("   ", false).is_blank());
        assert!(!Editor::from_string(" x ", false).is_blank());
    }
}
