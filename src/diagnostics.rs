use crate::lexer::Position;

/// Renders a `(position, message)` pair into a caret-underlined banner.
///
/// ```text
/// eta: error in file: <file>:<row+1>:<col+1>
/// <row+1> | <source line>
///            ^^^^^
///            <message>
/// ```
///
/// The caret run spans `[last.cursor, after.cursor)`. Colors are decorative
/// ANSI red, matching the reference implementation; callers that need plain
/// text can strip escape codes, but the structural content (file, line,
/// column, caret span, message) is what tests assert on.
pub fn render_banner(filename: &str, last: Position, after: Position, line: &str, message: &str) -> String {
    let digit_width = (last.row + 1).to_string().len();
    let indent = digit_width + last.column();
    let caret_len = (after.cursor - last.cursor).max(1);

    format!(
        "eta: \u{1b}[31merror in file: {file}:{row}:{col}\u{1b}[0m\n{row} | {line}\n{pad}   \u{1b}[31m{carets}\u{1b}[0m\n{pad}   \u{1b}[31m{message}\u{1b}[0m\n",
        file = filename,
        row = last.row + 1,
        col = last.column() + 1,
        line = line,
        pad = " ".repeat(indent),
        carets = "^".repeat(caret_len),
        message = message,
    )
}
