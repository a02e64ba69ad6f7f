//! Bounded trailing slice of captured output

use std::collections::VecDeque;

/// Ring buffer that keeps the newest `capacity` lines.
///
/// A capacity of zero keeps nothing but still counts what was seen.
#[derive(Debug, Clone)]
pub struct TailBuffer {
    capacity: usize,
    lines: VecDeque<String>,
    evicted: usize,
}

impl TailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity.min(1024)),
            evicted: 0,
        }
    }

    /// Append one line, stripping a trailing `\n` / `\r\n`
    pub fn push(&mut self, line: impl Into<String>) {
        let mut line = line.into();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.evicted += 1;
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_tail(self) -> Tail {
        Tail {
            lines: self.lines.into_iter().collect(),
            omitted: self.evicted,
        }
    }
}

/// Captured tail: the retained lines in order plus how many older lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tail {
    lines: Vec<String>,
    omitted: usize,
}

impl Tail {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A tail that is known to be complete
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines, omitted: 0 }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of earlier lines that did not fit
    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Keep only the last `cap` lines, folding the rest into the omitted count
    pub fn capped(&self, cap: usize) -> Tail {
        if self.lines.len() <= cap {
            return self.clone();
        }
        let cut = self.lines.len() - cap;
        Tail {
            lines: self.lines[cut..].to_vec(),
            omitted: self.omitted + cut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(capacity: usize, count: usize) -> Tail {
        let mut buffer = TailBuffer::new(capacity);
        for i in 0..count {
            buffer.push(format!("line {}\n", i));
        }
        buffer.into_tail()
    }

    #[test]
    fn keeps_last_n_lines_in_order() {
        for capacity in 0..6 {
            for count in 0..10 {
                let tail = fill(capacity, count);
                let expected: Vec<String> = (count.saturating_sub(capacity)..count)
                    .map(|i| format!("line {}", i))
                    .collect();
                assert!(tail.lines().len() <= capacity);
                assert_eq!(tail.lines(), expected.as_slice());
                assert_eq!(tail.omitted(), count - expected.len());
            }
        }
    }

    #[test]
    fn strips_crlf() {
        let mut buffer = TailBuffer::new(2);
        buffer.push("windows\r\n");
        assert_eq!(buffer.into_tail().lines(), ["windows".to_string()]);
    }

    #[test]
    fn capped_folds_into_omitted() {
        let tail = fill(5, 8).capped(2);
        assert_eq!(tail.lines(), ["line 6".to_string(), "line 7".to_string()]);
        assert_eq!(tail.omitted(), 6);
    }

    #[test]
    fn capped_noop_when_within_cap() {
        let tail = Tail::from_lines(vec!["a".to_string()]);
        assert_eq!(tail.capped(3), tail);
    }
}
