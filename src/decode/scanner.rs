use smallvec::SmallVec;

use crate::arena::{Arena, Token, TokenKind};
use crate::constants::{is_digit, MAX_INTEGER_DIGITS};
use crate::decode::validation::{
    check_integer_digits, check_key_order, check_length_prefix, SoftErrors,
};
use crate::num::parse_uint;
use crate::{DecodeError, DecodeOptions, ErrorKind, SoftError};

type FrameStack = SmallVec<[Frame; 16]>;

/// An open list or dict.
#[derive(Debug, Clone, Copy)]
struct Frame {
    token: usize,
    dict: bool,
    /// Dicts only: the next item is a key.
    expecting_key: bool,
    /// Dicts only: payload span of the previous key.
    last_key: Option<(usize, usize)>,
}

impl Frame {
    fn new(token: usize, kind: TokenKind) -> Self {
        Self {
            token,
            dict: kind == TokenKind::Dict,
            expecting_key: true,
            last_key: None,
        }
    }
}

pub struct ScanOutcome {
    pub soft_error: Option<SoftError>,
    pub error: Option<DecodeError>,
}

/// Tokenizes one top-level value of `buffer` into `arena`.
///
/// The arena is well formed afterwards even when an error is returned: open
/// containers are closed at the start of the item that failed, so complete
/// items keep their exact byte ranges, and a terminal end token is appended.
pub fn scan(buffer: &[u8], arena: &mut Arena, options: &DecodeOptions) -> ScanOutcome {
    let mut scanner = Scanner {
        buffer,
        arena,
        stack: FrameStack::new(),
        pos: 0,
        soft: SoftErrors::default(),
    };
    let error = match scanner.run(options) {
        Ok(()) => {
            scanner.arena.push(Token::terminator(scanner.pos));
            None
        }
        Err(err) => {
            let failed_item = scanner.pos;
            scanner.unwind(failed_item);
            Some(err)
        }
    };
    ScanOutcome {
        soft_error: scanner.soft.into_first(),
        error,
    }
}

struct Scanner<'b, 'r> {
    buffer: &'b [u8],
    arena: &'r mut Arena,
    stack: FrameStack,
    pos: usize,
    soft: SoftErrors,
}

impl Scanner<'_, '_> {
    fn run(&mut self, options: &DecodeOptions) -> Result<(), DecodeError> {
        let mut budget = options.token_limit;
        loop {
            if self.pos >= self.buffer.len() {
                return Err(self.fail(ErrorKind::UnexpectedEof, self.pos));
            }
            if self.stack.len() > options.depth_limit {
                return Err(self.fail(ErrorKind::DepthExceeded, self.pos));
            }
            if budget == 0 {
                return Err(self.fail(ErrorKind::LimitExceeded, self.pos));
            }
            budget -= 1;

            let byte = self.buffer[self.pos];
            let parent = self.stack.len().checked_sub(1);
            let mut is_key = false;
            if let Some(frame) = self.stack.last() {
                if frame.dict {
                    if byte == b'e' {
                        if !frame.expecting_key {
                            return Err(self.fail(ErrorKind::ExpectedValue, self.pos));
                        }
                    } else if frame.expecting_key {
                        if !is_digit(byte) {
                            return Err(self.fail(ErrorKind::ExpectedDigit, self.pos));
                        }
                        is_key = true;
                    }
                }
            }

            match byte {
                b'd' => self.open(TokenKind::Dict),
                b'l' => self.open(TokenKind::List),
                b'i' => self.integer()?,
                b'e' => self.close()?,
                b'0'..=b'9' => self.string(is_key)?,
                _ => return Err(self.fail(ErrorKind::ExpectedValue, self.pos)),
            }

            if byte != b'e' {
                if let Some(frame) = parent.map(|index| &mut self.stack[index]) {
                    if frame.dict {
                        frame.expecting_key = !frame.expecting_key;
                    }
                }
            }

            if self.stack.is_empty() {
                return Ok(());
            }
        }
    }

    fn open(&mut self, kind: TokenKind) {
        let token = self.arena.push(Token::container(self.pos, kind));
        self.stack.push(Frame::new(token, kind));
        self.pos += 1;
    }

    fn close(&mut self) -> Result<(), DecodeError> {
        let Some(frame) = self.stack.pop() else {
            return Err(self.fail(ErrorKind::UnexpectedEof, self.pos));
        };
        self.arena.push(Token::end(self.pos));
        self.arena.close(frame.token);
        self.pos += 1;
        Ok(())
    }

    fn integer(&mut self) -> Result<(), DecodeError> {
        let start = self.pos;
        let bytes = self.buffer;
        let mut pos = start + 1;
        let negative = bytes.get(pos) == Some(&b'-');
        if negative {
            pos += 1;
        }
        let digits_start = pos;
        if pos >= bytes.len() {
            return Err(self.fail(ErrorKind::UnexpectedEof, pos));
        }
        loop {
            if !is_digit(bytes[pos]) {
                return Err(self.fail(ErrorKind::ExpectedDigit, pos));
            }
            pos += 1;
            if pos - digits_start > MAX_INTEGER_DIGITS {
                return Err(self.fail(ErrorKind::Overflow, pos));
            }
            if pos >= bytes.len() {
                return Err(self.fail(ErrorKind::UnexpectedEof, pos));
            }
            if bytes[pos] == b'e' {
                break;
            }
        }

        if let Some(kind) = check_integer_digits(negative, &bytes[digits_start..pos]) {
            self.soft.record(kind, start);
        }
        self.arena.push(Token::integer(start));
        self.pos = pos + 1;
        Ok(())
    }

    fn string(&mut self, is_key: bool) -> Result<(), DecodeError> {
        let start = self.pos;
        let (len, digits) = parse_uint(&self.buffer[start..], b':')
            .map_err(|err| self.fail(err.kind, start + err.position))?;
        let colon = start + digits;
        let payload = colon + 1;
        let remaining = self.buffer.len() - payload;
        if len as u64 > remaining as u64 {
            return Err(self.fail(ErrorKind::UnexpectedEof, colon));
        }
        let end = payload + len as usize;

        if let Some(kind) = check_length_prefix(&self.buffer[start..colon]) {
            self.soft.record(kind, start);
        }
        if is_key {
            self.check_key(start, payload, end);
        }
        self.arena.push(Token::string(start, digits + 1));
        self.pos = end;
        Ok(())
    }

    fn check_key(&mut self, offset: usize, payload: usize, end: usize) {
        let buffer = self.buffer;
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let previous = frame.last_key.replace((payload, end));
        if let Some((prev_start, prev_end)) = previous {
            let verdict = check_key_order(&buffer[prev_start..prev_end], &buffer[payload..end]);
            if let Some(kind) = verdict {
                self.soft.record(kind, offset);
            }
        }
    }

    fn fail(&self, kind: ErrorKind, offset: usize) -> DecodeError {
        DecodeError::new(kind, offset)
    }

    /// Closes every open container at `offset`, innermost first.
    fn unwind(&mut self, offset: usize) {
        while let Some(frame) = self.stack.pop() {
            if frame.dict && !frame.expecting_key {
                // keep key/value pairs intact
                self.arena.push(Token::string(offset, 0));
            }
            self.arena.push(Token::end(offset));
            self.arena.close(frame.token);
        }
        self.arena.push(Token::terminator(offset));
    }
}
