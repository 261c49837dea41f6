//! Substring search utilities. Self-contained; nothing here touches the
//! container types.

/// Lowest index at which `pattern` begins in `text`, checking every
/// alignment. `Some(0)` for the empty pattern.
pub fn find_brute(text: &[u8], pattern: &[u8]) -> Option<usize> {
    let n = text.len();
    let m = pattern.len();
    if m > n {
        return None;
    }
    (0..=n - m).find(|&i| text[i..i + m] == *pattern)
}

/// Boyer-Moore search with the bad-character heuristic.
///
/// On a mismatch at pattern index `k`, the window jumps so the mismatched
/// text byte lines up with its last occurrence in the pattern (or past the
/// window when it does not occur at all). Worst case O(n*m), sublinear on
/// typical text.
pub fn find_boyer_moore(text: &[u8], pattern: &[u8]) -> Option<usize> {
    let n = text.len();
    let m = pattern.len();
    if m == 0 {
        return Some(0);
    }
    if m > n {
        return None;
    }

    // Last occurrence of each byte value in the pattern.
    let mut last = [None; 256];
    for (i, &b) in pattern.iter().enumerate() {
        last[b as usize] = Some(i);
    }

    let mut i = m - 1; // index into text
    let mut k = m - 1; // index into pattern
    loop {
        if text[i] == pattern[k] {
            if k == 0 {
                return Some(i);
            }
            i -= 1;
            k -= 1;
        } else {
            let jump = match last[text[i] as usize] {
                Some(j) if j < k => k - j,
                Some(_) => 1,
                None => k + 1,
            };
            i += (m - 1 - k) + jump;
            if i >= n {
                return None;
            }
            k = m - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: &[(&[u8], &[u8], Option<usize>)] = &[
        (b"abacaabaccabacabaabb", b"abacab", Some(10)),
        (b"hello world", b"world", Some(6)),
        (b"hello world", b"hello", Some(0)),
        (b"hello world", b"xyz", None),
        (b"aaaaa", b"aaa", Some(0)),
        (b"ab", b"abc", None),
        (b"", b"a", None),
        (b"abc", b"", Some(0)),
        (b"", b"", Some(0)),
        (b"mississippi", b"issip", Some(4)),
        (b"mississippi", b"sip", Some(6)),
    ];

    /// Invariant: brute force returns the lowest match index or None.
    #[test]
    fn brute_force_cases() {
        for &(text, pattern, expected) in CASES {
            assert_eq!(
                find_brute(text, pattern),
                expected,
                "text {:?} pattern {:?}",
                text,
                pattern
            );
        }
    }

    /// Invariant: Boyer-Moore agrees with brute force on every case.
    #[test]
    fn boyer_moore_matches_brute_force() {
        for &(text, pattern, expected) in CASES {
            assert_eq!(
                find_boyer_moore(text, pattern),
                expected,
                "text {:?} pattern {:?}",
                text,
                pattern
            );
        }
    }

    /// Invariant: both algorithms agree across generated inputs of a small
    /// alphabet (dense with near-matches).
    #[test]
    fn algorithms_agree_on_generated_inputs() {
        let text: Vec<u8> = (0..200u32).map(|i| b'a' + (i * 7 % 3) as u8).collect();
        for start in (0..180usize).step_by(13) {
            for len in [1usize, 2, 3, 5, 8] {
                let pattern = text[start..start + len].to_vec();
                assert_eq!(
                    find_brute(&text, &pattern),
                    find_boyer_moore(&text, &pattern)
                );
            }
        }
    }
}
