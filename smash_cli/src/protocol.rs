// smash_cli/src/protocol.rs
#![forbid(unsafe_code)]

/*
Turn protocol (line oriented, one turn per block):

    8 lines   upcoming pairs, "A B" with colors 1..=5
    12 lines  own grid, top row first, 6 chars each ('.', '0', '1'..'5')
    12 lines  opponent grid, same format

One answer line per turn on stdout: "column rotation [annotation]".
*/

use std::io::BufRead;

use smash_engine::{Error, LOOKAHEAD, ROWS, Result, TurnInput};

pub struct TurnReader<R: BufRead> {
    input: R,
    line: String,
}

impl<R: BufRead> TurnReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    fn read_block(&mut self, n: usize, what: &'static str) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            match self.next_line()? {
                Some(line) => out.push(line),
                None => return Err(Error::UnexpectedEof { what }),
            }
        }
        Ok(out)
    }

    /// Next turn, or `None` on a clean end of input before the turn starts.
    pub fn read_turn(&mut self) -> Result<Option<TurnInput>> {
        let Some(first) = self.next_line()? else {
            return Ok(None);
        };
        let mut pairs = Vec::with_capacity(LOOKAHEAD);
        pairs.push(first);
        pairs.extend(self.read_block(LOOKAHEAD - 1, "pair queue")?);

        let own = self.read_block(ROWS, "own grid")?;
        let opponent = self.read_block(ROWS, "opponent grid")?;

        TurnInput::parse(&pairs, &own, &opponent).map(Some)
    }
}
