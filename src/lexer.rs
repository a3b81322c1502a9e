use crate::index::MAX_WORD_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub u32, pub u32);

impl Pos {
    pub fn start() -> Pos {
        Pos(0, 0)
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: Pos,
    pub end: Pos,
    pub lexeme: String,
}

/// Splits prose into candidate words.
///
/// A word is a run of ASCII letters that may contain apostrophes after its
/// first letter. Runs containing digits and runs longer than the maximum word
/// length are consumed and dropped. Columns count bytes, so a multi-byte
/// character advances the column by its encoded length.
#[derive(Debug)]
pub struct Lexer {
    text: Vec<u8>,
    max_len: usize,
    col: u32,
    line: u32,
    offset: usize,
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl Lexer {
    pub fn new<T: AsRef<str>>(text: T) -> Lexer {
        Lexer::with_max_len(text, MAX_WORD_LENGTH)
    }

    pub fn with_max_len<T: AsRef<str>>(text: T, max_len: usize) -> Lexer {
        Lexer {
            text: text.as_ref().as_bytes().to_vec(),
            max_len,
            col: 0,
            line: 0,
            offset: 0,
        }
    }

    fn pos(&self) -> Pos {
        Pos(self.line, self.col)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            match self.peek()? {
                b if b.is_ascii_alphabetic() => {
                    if let Some(token) = self.word() {
                        return Some(token);
                    }
                }
                b if b.is_ascii_digit() => self.skip_while(|b| b.is_ascii_alphanumeric()),
                _ => {
                    self.next()?;
                }
            }
        }
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;

        self.col += 1;

        if byte == b'\n' {
            self.col = 0;
            self.line += 1;
        }
        self.offset += 1;

        Some(byte)
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.offset).copied()
    }

    fn skip_while<F: Fn(u8) -> bool>(&mut self, keep_going: F) {
        while self.peek().is_some_and(&keep_going) {
            self.next();
        }
    }

    // Returns None when the run turned out to be too long or to contain a digit.
    fn word(&mut self) -> Option<Token> {
        let start = self.pos();
        let mut lexeme = String::new();

        while let Some(byte) = self.peek() {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' | b'\'' => {
                    lexeme.push(char::from(byte));
                    self.next();
                    if lexeme.len() > self.max_len {
                        self.skip_while(|b| b.is_ascii_alphabetic());
                        return None;
                    }
                }
                b'0'..=b'9' => {
                    self.skip_while(|b| b.is_ascii_alphanumeric());
                    return None;
                }
                _ => break,
            }
        }

        Some(Token {
            start,
            end: self.pos(),
            lexeme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(text: &str) -> Vec<String> {
        Lexer::new(text).map(|t| t.lexeme).collect()
    }

    #[test]
    fn lex_prose() {
        let text = "It was a bright cold day in April, and the clocks were striking thirteen.";
        assert_eq!(
            lexemes(text),
            vec![
                "It", "was", "a", "bright", "cold", "day", "in", "April", "and", "the",
                "clocks", "were", "striking", "thirteen"
            ]
        );
    }

    #[test]
    fn apostrophes_inside_words() {
        assert_eq!(lexemes("don't 'quoted' rock'n'roll"), vec!["don't", "quoted'", "rock'n'roll"]);
    }

    #[test]
    fn words_with_digits_are_dropped() {
        assert_eq!(lexemes("mp3 player r2d2 42 is here"), vec!["player", "is", "here"]);
    }

    #[test]
    fn overlong_runs_are_dropped() {
        let long = "a".repeat(MAX_WORD_LENGTH + 1);
        let exact = "b".repeat(MAX_WORD_LENGTH);
        let text = format!("before {long} {exact} after");
        assert_eq!(lexemes(&text), vec!["before".to_string(), exact, "after".to_string()]);

        let short: Vec<_> = Lexer::with_max_len("tiny enormous", 4).map(|t| t.lexeme).collect();
        assert_eq!(short, vec!["tiny"]);
    }

    #[test]
    fn non_ascii_letters_separate_words() {
        assert_eq!(lexemes("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn columns_count_bytes() {
        let tokens: Vec<_> = Lexer::new("é ok").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "ok");
        assert_eq!(tokens[0].start, Pos(0, 3));
    }

    #[test]
    fn token_positions() {
        let tokens: Vec<_> = Lexer::new("one two\n  three").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].start, Pos::start());
        assert_eq!(tokens[0].end, Pos(0, 3));
        assert_eq!(tokens[1].start, Pos(0, 4));
        assert_eq!(tokens[2].start.line(), 1);
        assert_eq!(tokens[2].start.column(), 2);
        assert_eq!(tokens[2].end, Pos(1, 7));
    }

    #[test]
    fn empty_text() {
        assert!(lexemes("").is_empty());
        assert!(lexemes(" ,.;\n\t").is_empty());
    }
}
