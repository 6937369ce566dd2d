///
/// Token
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Any,
    One,
    Literal(char),
}

fn tokenize(pattern: &str, escape: Option<char>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        let token = match ch {
            // a trailing escape matches itself
            ch if Some(ch) == escape => Token::Literal(chars.next().unwrap_or(ch)),
            '%' => Token::Any,
            '_' => Token::One,
            ch => Token::Literal(ch),
        };
        tokens.push(token);
    }

    tokens
}

/// SQL `LIKE` match of `text` against `pattern`.
///
/// `%` matches any run of characters, `_` exactly one; with an escape
/// character, the character after it is matched literally.
/// Matching is case-sensitive; callers lower-case both sides.
#[must_use]
pub fn like_matches(text: &str, pattern: &str, escape: Option<char>) -> bool {
    let text: Vec<char> = text.chars().collect();
    let tokens = tokenize(pattern, escape);

    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::One) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(ch)) if *ch == text[t] => {
                t += 1;
                p += 1;
            }
            Some(Token::Any) => {
                backtrack = Some((p, t));
                p += 1;
            }
            _ => match backtrack {
                Some((star, mark)) => {
                    p = star + 1;
                    t = mark + 1;
                    backtrack = Some((star, mark + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|token| *token == Token::Any)
}
