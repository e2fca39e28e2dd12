//! Shell-like splitting of dry-run command lines.

/// Split a line into its leading token and the remaining argument text.
pub fn split_leading(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    }
}

/// Split argument text into tokens.
///
/// Tokens are separated by whitespace, except inside a single- or
/// double-quoted run, which may start anywhere in a token and keeps its
/// whitespace. Quote characters are dropped. An unterminated quote extends to
/// the end of the input. A backslash escapes a following quote, backslash or
/// whitespace character (outside single quotes); any other backslash is kept
/// literally so Windows-style paths survive.
///
/// A doubled backslash collapses to one, as `/bin/sh` does when make runs the
/// line, so an unquoted UNC path (`-I\\server\share`) comes out as
/// `\server\share`. Single-quote UNC paths to keep both leading backslashes.
pub fn tokenize(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' && quote != Some('\'') {
            if let Some(&next) = chars.peek()
                && (next == '"' || next == '\'' || next == '\\' || next.is_whitespace())
            {
                current.push(next);
                chars.next();
            } else {
                current.push(c);
            }
            in_token = true;
            continue;
        }

        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
