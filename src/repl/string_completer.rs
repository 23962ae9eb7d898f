use rustc_hash::FxHashSet;
use rustyline::completion::Completer;
use rustyline::completion::Pair;
use rustyline::Context;

/// Completes the word under the cursor from a fixed set of names.
pub struct StringCompleter {
    strings: FxHashSet<String>,
}

impl StringCompleter {
    pub fn from<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: input.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    fn complete_word(&self, pos: usize, word: &str) -> rustyline::Result<(usize, Vec<Pair>)> {
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let mut all_matches: Vec<Pair> = self
            .strings
            .iter()
            .filter(|known| known.starts_with(word))
            .map(|known| Pair {
                display: known.clone(),
                replacement: known.clone(),
            })
            .collect();

        all_matches.sort_by(|a, b| a.display.cmp(&b.display));
        Ok((pos - word.len(), all_matches))
    }
}

// the word ends at the cursor and starts after the last delimiter
fn word_before(line: &str, pos: usize) -> &str {
    let head = &line[..pos];
    let start = head
        .rfind(|c: char| c.is_whitespace() || "()[]{}'`~@^#\",".contains(c))
        .map_or(0, |i| i + 1);

    &head[start..]
}

impl Completer for StringCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.complete_word(pos, word_before(line, pos))
    }
}
