/// Single-line text editor used by the form fields.
/// The cursor counts characters, not bytes, so Polish letters edit cleanly.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub value: String,
    pub cursor: usize,
    pub password: bool,
}

impl LineEdit {
    pub fn masked() -> Self {
        Self {
            password: true,
            ..Self::default()
        }
    }

    pub fn with_value(s: impl Into<String>) -> Self {
        let mut edit = Self::default();
        edit.set(s);
        edit
    }

    pub fn set(&mut self, s: impl Into<String>) {
        self.value = s.into();
        self.cursor = self.value.chars().count();
    }

    fn byte_at(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn push(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_at(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_at(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn rendered(&self) -> String {
        if self.password {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text() {
        let mut e = LineEdit::with_value("Październik");
        e.left();
        e.left();
        e.backspace();
        assert_eq!(e.value, "Paździerik");
        e.push('ł');
        assert_eq!(e.value, "Paździerłik");
        e.delete();
        assert_eq!(e.value, "Paździerłk");
    }

    #[test]
    fn masked_field_hides_characters() {
        let mut e = LineEdit::masked();
        for c in "hasło".chars() {
            e.push(c);
        }
        assert_eq!(e.rendered(), "*****");
        assert_eq!(e.value, "hasło");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut e = LineEdit::default();
        e.left();
        e.backspace();
        e.delete();
        e.right();
        assert_eq!(e.cursor, 0);
        e.push('a');
        e.right();
        assert_eq!(e.cursor, 1);
        e.clear();
        assert!(e.value.is_empty());
    }
}
