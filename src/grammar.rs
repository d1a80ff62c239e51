//! The accepted JSON grammar and output rules
//!
//! This module contains no code. It documents exactly what the parser accepts
//! and what the serializer produces, as implemented by this library.
//!
//! # Documents
//!
//! A document is exactly one value, optionally surrounded by whitespace:
//!
//! ```text
//! document   = ws value ws EOF
//! ws         = *( %x20 / %x09 / %x0A / %x0D )
//! ```
//!
//! Only space, tab, line feed and carriage return count as whitespace. A
//! byte-order mark, a form feed or a non-breaking space is an error. Empty
//! input, or input holding only whitespace, is an error.
//!
//! # Values
//!
//! The first character of a value selects its kind; no other character may
//! start one:
//!
//! | First character | Kind |
//! |-----------------|------|
//! | `{` | object |
//! | `[` | array |
//! | `"` | string |
//! | `t` `f` | boolean (`true`, `false`) |
//! | `n` | null |
//! | `-` `0`-`9` | number |
//!
//! Keywords are case-sensitive and matched character by character. `True`,
//! `NULL`, `nul` and `NaN` are all rejected.
//!
//! # Objects and Arrays
//!
//! ```text
//! object = "{" ws [ member *( ws "," ws member ) ] ws "}"
//! member = string ws ":" ws value
//! array  = "[" ws [ value *( ws "," ws value ) ] ws "]"
//! ```
//!
//! - Keys must be double-quoted strings.
//! - A trailing comma (`[1,]`, `{"a":1,}`) or a leading one (`[,1]`) is an error.
//! - When a key repeats, the later value replaces the earlier one and the key
//!   keeps its first position.
//! - Nesting deeper than [`ParseOptions::max_depth`](crate::ParseOptions)
//!   (128 by default) is an error.
//!
//! # Strings
//!
//! ```text
//! string = %x22 *char %x22
//! char   = unescaped / "\" ( %x22 / "\" / "/" / "b" / "f" / "n" / "r" / "t" / "u" 4HEXDIG )
//! ```
//!
//! - Any character at or above U+0020 other than `"` and `\` stands for
//!   itself, including the full non-ASCII range.
//! - A raw line feed, any other raw control character below U+0020, and end
//!   of input before the closing quote are errors.
//! - `\u` takes exactly four hex digits in either case. A UTF-16 surrogate
//!   pair written as two consecutive escapes (`\ud83d\ude00`) decodes to one
//!   character. A lone surrogate is an error.
//!
//! # Numbers
//!
//! ```text
//! number = [ "-" ] int [ frac ] [ exp ]
//! int    = "0" / ( %x31-39 *DIGIT )
//! frac   = "." 1*DIGIT
//! exp    = ( "e" / "E" ) [ "+" / "-" ] 1*DIGIT
//! ```
//!
//! - `01`, `-01`, `+1`, `.5`, `1.`, `1e` and `-` are errors.
//! - The literal is converted to the nearest double. A literal too large for a
//!   double (`1e400`) is an error; one too small rounds to zero.
//! - `-0` is kept as negative zero.
//!
//! # Output
//!
//! The serializer writes compact text with no whitespace between tokens.
//!
//! | Input character | Written as |
//! |-----------------|------------|
//! | `"` | `\"` |
//! | `\` | `\\` |
//! | U+0008, U+000C, LF, CR, tab | `\b`, `\f`, `\n`, `\r`, `\t` |
//! | other U+0000 to U+001F | `\u00xx` |
//! | `/` | `/` |
//! | non-ASCII | itself, or `\uxxxx` with [`WriteOptions::ascii_only`](crate::WriteOptions) |
//!
//! Numbers are written as the shortest decimal that reads back as the same
//! double. Very large and very small magnitudes use an exponent (`1e21`,
//! `5e-324`), and whole values carry no fraction. NaN and the infinities are
//! written as `null`.
//!
//! Every finite tree therefore survives a write followed by a parse unchanged,
//! and writing, parsing and writing again yields identical text.
