//! HAScript boilerplate for SFTL output.
//!
//! Attribute assignments use `\=`, which the host tool's script importer
//! requires. Templates are written with `\n` and converted to CRLF once the
//! whole document is assembled.

/// Opening of every SFTL document, up to and including `<actions>`.
pub const SFTL_HEADER: &str = concat!(
    "#Auto-generated SFTL file\n",
    r#"code=<HAScript name\="" description\="" timeout\="60000" pausetime\="300" "#,
    r#"promptall\="true" blockinput\="false" author\="" creationdate\="" "#,
    r#"supressclearevents\="false" usevars\="false" ignorepauseforenhancedtn\="true" "#,
    r#"delayifnotenhancedtn\="0" ignorepausetimeforenhancedtn\="true">"#,
    "\n\n",
    "\t",
    r#"<screen name\="Screen1" entryscreen\="true" exitscreen\="true" transient\="false">"#,
    "\n",
    "\t\t<description >\n",
    "\t\t\t",
    r#"<oia status\="NOTINHIBITED" optional\="false" invertmatch\="false" />"#,
    "\n",
    "\t\t</description>\n",
    "\t\t<actions>\n",
);

/// Closing of every SFTL document, including the import metadata lines.
pub const SFTL_FOOTER: &str = concat!(
    "\t\t</actions>\n",
    "\t\t",
    r#"<nextscreens timeout\="0" >"#,
    "\n",
    "\t\t</nextscreens>\n",
    "\t</screen>\n",
    "\n",
    "</HAScript>\n",
    "hostType=MVS/TSO\n",
    "version=400\n",
    "direction=SEND\n",
);

/// Pause emitted after every transfer.
pub const PAUSE_ACTION: &str = "\t\t\t<pause value\\=\"1500\" />\n";

/// Renders one `<filexfer>` action followed by its pause.
///
/// Values must already be XML-escaped.
pub fn filexfer_block(hostfile: &str, pcfile: &str, options: &str) -> String {
    format!(
        "\t\t\t<filexfer direction\\=\"send\" hostfile\\=\"{hostfile}\" \
         pcfile\\=\"{pcfile}\" options\\=\"{options}\" clear\\=\"false\" \
         timeout\\=\"30\" pccodepage\\=\"437\" mtusize\\=\"2500\"  />\n{PAUSE_ACTION}"
    )
}

/// Escapes the characters that would break an XML attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
