use ropey::Rope;

/// Where the next keystroke lands.
///
/// Columns are counted in characters, matching how every other offset in
/// the crate is measured. The sticky column remembers where vertical
/// movement started so the cursor snaps back when a longer line comes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in characters.
    pub col: usize,
    sticky: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky: col,
        }
    }

    /// Place the column and forget any sticky position.
    const fn place(&mut self, col: usize) {
        self.col = col;
        self.sticky = col;
    }
}

/// One step of cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The raw note text.
///
/// A rope plus a cursor. Whatever surface is in front of the user, this
/// buffer holds the document; rendered-surface edits are serialized back
/// into it before anything else reads them.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
        }
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// One line's content, without its line ending. `None` past the end.
    pub fn line_at(&self, idx: usize) -> Option<String> {
        (idx < self.rope.len_lines()).then(|| {
            let line = self.rope.line(idx).to_string();
            line.trim_end_matches(['\n', '\r']).to_string()
        })
    }

    /// Characters on a line, excluding the line ending.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line_at(idx).map_or(0, |s| s.chars().count())
    }

    /// The whole document as one string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the document, clamping the cursor back into bounds.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let Cursor { line, col, .. } = self.cursor;
        self.move_to(line, col);
    }

    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whitespace-separated words, the count a status bar shows.
    pub fn word_count(&self) -> usize {
        self.rope.to_string().split_whitespace().count()
    }

    /// One-based `(line, column)` for display.
    pub fn position(&self) -> (usize, usize) {
        let col = self.cursor.col.min(self.line_len(self.cursor.line));
        (self.cursor.line + 1, col + 1)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.char_index(), ch);
        self.cursor.place(self.cursor.col + 1);
    }

    /// Insert a string, leaving the cursor after the inserted text.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.rope.insert(self.char_index(), s);
        if let Some((_, tail)) = s.rsplit_once('\n') {
            self.cursor.line += s.matches('\n').count();
            self.cursor.place(tail.chars().count());
        } else {
            self.cursor.place(self.cursor.col + s.chars().count());
        }
    }

    /// Break the current line at the cursor (Enter).
    pub fn split_line(&mut self) {
        self.rope.insert_char(self.char_index(), '\n');
        self.cursor.line += 1;
        self.cursor.place(0);
    }

    /// Delete the character before the cursor (Backspace), joining lines
    /// at a line start. Returns `false` at the top of the document.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.char_index();
        if idx == 0 {
            return false;
        }
        if self.cursor.col == 0 {
            let prev = self.cursor.line - 1;
            let landing = self.line_len(prev);
            self.rope.remove(idx - 1..idx);
            self.cursor.line = prev;
            self.cursor.place(landing);
        } else {
            self.rope.remove(idx - 1..idx);
            self.cursor.place(self.cursor.col - 1);
        }
        true
    }

    /// Delete the character at the cursor (Delete), joining lines at a
    /// line end. Returns `false` at the bottom of the document.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.char_index();
        if idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(idx..=idx);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.step_left(),
            Direction::Right => self.step_right(),
            Direction::Up => self.step_vertical(-1),
            Direction::Down => self.step_vertical(1),
        }
    }

    /// Home.
    pub const fn move_home(&mut self) {
        self.cursor.place(0);
    }

    /// End.
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.place(len);
    }

    /// Jump to the start of the current or previous word (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.place(self.line_len(self.cursor.line));
            }
            return;
        }
        let chars = self.line_chars(self.cursor.line);
        let mut pos = self.cursor.col.min(chars.len());
        while pos > 0 && !is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        self.cursor.place(pos);
    }

    /// Jump past the current word to the start of the next (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let len = self.line_len(self.cursor.line);
        if self.cursor.col >= len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.place(0);
            }
            return;
        }
        let chars = self.line_chars(self.cursor.line);
        let mut pos = self.cursor.col;
        while pos < len && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < len && !is_word_char(chars[pos]) {
            pos += 1;
        }
        self.cursor.place(pos);
    }

    /// Place the cursor at a position, clamping both axes into bounds.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.line_count().saturating_sub(1));
        let len = self.line_len(self.cursor.line);
        self.cursor.place(col.min(len));
    }

    /// Ctrl+Home.
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.place(0);
    }

    /// Ctrl+End.
    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.place(self.line_len(last));
    }

    /// The cursor as an index into the rope's character sequence.
    fn char_index(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        line_start + self.cursor.col.min(self.line_len(self.cursor.line))
    }

    fn line_chars(&self, idx: usize) -> Vec<char> {
        self.line_at(idx).unwrap_or_default().chars().collect()
    }

    fn step_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.place(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.place(self.line_len(self.cursor.line));
        }
    }

    fn step_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.place(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.place(0);
        }
    }

    /// Vertical movement keeps the sticky column: landing on a shorter
    /// line clamps the visible column but not the remembered one.
    fn step_vertical(&mut self, delta: isize) {
        let target = self.cursor.line.checked_add_signed(delta);
        let Some(line) = target.filter(|&l| l < self.line_count()) else {
            return;
        };
        self.cursor.line = line;
        self.cursor.col = self.cursor.sticky.min(self.line_len(line));
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("chars", &self.rope.len_chars())
            .field("cursor", &self.cursor)
            .finish()
    }
}
