use super::Position;
use std::str::Chars;

/// Character source for the scanner.
///
/// Tracks the position of every character it hands out and allows the last
/// [`PUSHBACK_DEPTH`] characters to be pushed back. `None` stands for end of
/// input; reading it does not advance the position, so repeated reads at the
/// end stay put.
#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    pos: Position,
    /// Characters handed out most recently, newest last.
    history: Vec<(Option<char>, Position)>,
    /// Characters to hand out again before reading on, next one last.
    pushed_back: Vec<(Option<char>, Position)>,
}

/// `take_if` may hold one character back while the scanner unscans another.
const PUSHBACK_DEPTH: usize = 2;

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars(),
            pos: Position::default(),
            history: Vec::with_capacity(PUSHBACK_DEPTH + 1),
            pushed_back: Vec::with_capacity(PUSHBACK_DEPTH),
        }
    }

    /// Returns the next character together with the position it was read at.
    pub fn take(&mut self) -> (Option<char>, Position) {
        let item = match self.pushed_back.pop() {
            Some(item) => item,
            None => self.read(),
        };

        self.history.push(item);
        if self.history.len() > PUSHBACK_DEPTH {
            self.history.remove(0);
        }
        item
    }

    fn read(&mut self) -> (Option<char>, Position) {
        let pos = self.pos;
        let c = match self.chars.next() {
            Some('\r') => {
                // \r\n and a lone \r are both a single newline
                if self.peek_raw() == Some('\n') {
                    self.chars.next();
                }
                Some('\n')
            }
            other => other,
        };

        match c {
            Some('\n') => {
                self.pos.line += 1;
                self.pos.column = 0;
            }
            Some(_) => self.pos.column += 1,
            None => (),
        }

        (c, pos)
    }

    /// Pushes the last character taken back; the next [`take`](Cursor::take)
    /// returns it again. Does nothing once the history is used up.
    pub fn untake(&mut self) {
        if let Some(item) = self.history.pop() {
            self.pushed_back.push(item);
        }
    }

    /// Takes the next character if it satisfies `p`, pushes it back otherwise.
    #[inline]
    pub fn take_if(&mut self, p: impl FnOnce(char) -> bool) -> Option<char> {
        match self.take().0 {
            Some(c) if p(c) => Some(c),
            _ => {
                self.untake();
                None
            }
        }
    }

    fn peek_raw(&self) -> Option<char> {
        // cheap to clone
        self.chars.clone().next()
    }
}
