//! The built-in schema: every section and option the pager understands.
//!
//! To add, remove or change an option, edit this table. Defaults are written
//! exactly as they would appear in a config file and are validated when the
//! schema is compiled.

use super::{OptionSpec as O, SchemaBuilder};

pub(super) fn schema() -> SchemaBuilder {
    let mut s = SchemaBuilder::new();
    chars(&mut s);
    colours(&mut s);
    keys(&mut s);
    layout(&mut s);
    mouse(&mut s);
    tcap(&mut s);
    capabilities(&mut s);
    misc(&mut s);
    s
}

fn chars(s: &mut SchemaBuilder) {
    s.section("chars")
        .option("sbar_top", O::wstring("┬").doc("Scrollbar top"))
        .option("sbar_vline", O::wstring("│").doc("Scrollbar vertical line"))
        .option("sbar_bottom", O::wstring("┴").doc("Scrollbar bottom"))
        .option("sbar_block", O::wstring("█").doc("Scrollbar position indicator"))
        .option("trans_mode_name", O::wstring("│").doc("Status line mode to name transition"))
        .option("trans_name_loc", O::wstring("│").doc("Status line name to location transition"))
        .option("trans_prompt_help", O::wstring(" ").doc("Input line prompt to help transition"))
        .option("trans_prompt_em", O::wstring(" ").doc("Input line prompt to error message transition"))
        .option("box_hline", O::wstring("─").doc("Box horizontal line"))
        .option("box_vline", O::wstring("│").doc("Box vertical line"))
        .option("box_tl", O::wstring("┌").doc("Box top left corner"))
        .option("box_tr", O::wstring("┐").doc("Box top right corner"))
        .option("box_bl", O::wstring("└").doc("Box bottom left corner"))
        .option("box_br", O::wstring("┘").doc("Box bottom right corner"))
        .option("arrow_up", O::wstring("↑").doc("Up arrow"))
        .option("arrow_down", O::wstring("↓").doc("Down arrow"))
        .option("arrow_lr", O::wstring("↔").doc("Left-right arrow"));
}

fn colours(s: &mut SchemaBuilder) {
    s.section("colours")
        .option("text", O::colour(&["white", "black", "false"]).doc("Normal text"))
        .option("search", O::colour(&["black", "white", "false"]).doc("Highlighted search results"))
        .option("mark", O::colour(&["black", "cyan", "false"]).doc("Marked text"))
        .option("link_man", O::colour(&["green", "black", "false"]).doc("Links to manual pages"))
        .option("link_man_f", O::colour(&["black", "green", "false"]).doc("Links to manual pages (focused)"))
        .option("link_http", O::colour(&["magenta", "black", "false"]).doc("Links to http(s) URLs"))
        .option("link_http_f", O::colour(&["black", "magenta", "false"]).doc("Links to http(s) URLs (focused)"))
        .option("link_email", O::colour(&["magenta", "black", "false"]).doc("Links to email addresses"))
        .option("link_email_f", O::colour(&["black", "magenta", "false"]).doc("Links to email addresses (focused)"))
        .option("link_ls", O::colour(&["yellow", "black", "false"]).doc("Links to local searches"))
        .option("link_ls_f", O::colour(&["black", "yellow", "false"]).doc("Links to local searches (focused)"))
        .option("sb_line", O::colour(&["yellow", "black", "false"]).doc("Scrollbar line"))
        .option("sb_block", O::colour(&["yellow", "black", "false"]).doc("Scrollbar indicator block"))
        .option("stat_indic_mode", O::colour(&["yellow", "red", "true"]).doc("Status line mode section"))
        .option("stat_indic_name", O::colour(&["white", "blue", "true"]).doc("Status line name section"))
        .option("stat_indic_loc", O::colour(&["black", "white", "false"]).doc("Status line location section"))
        .option("stat_input_prompt", O::colour(&["white", "black", "false"]).doc("Input line prompt"))
        .option("stat_input_help", O::colour(&["yellow", "black", "true"]).doc("Input line help"))
        .option("stat_input_em", O::colour(&["red", "black", "true"]).doc("Input line error message"))
        .option("imm_border", O::colour(&["yellow", "black", "false"]).doc("Popup window border"))
        .option("imm_title", O::colour(&["yellow", "red", "true"]).doc("Popup window title bar"))
        .option("sp_input", O::colour(&["white", "black", "true"]).doc("Page prompt input field"))
        .option("sp_text", O::colour(&["black", "black", "true"]).doc("Page prompt suggestions"))
        .option("sp_text_f", O::colour(&["black", "white", "false"]).doc("Page prompt suggestions (focused)"))
        .option("help_text", O::colour(&["white", "black", "true"]).doc("Help text"))
        .option("help_text_f", O::colour(&["black", "white", "false"]).doc("Help text (focused line)"))
        .option("fallback", O::colour(&["white", "black", "false"]).doc("Colour used on monochrome terminals"))
        // Pair numbers derived by the renderer from the colours above.
        .option("trans_mode_name", O::int(0, 32767, "0").internal())
        .option("trans_name_loc", O::int(0, 32767, "0").internal())
        .option("trans_prompt_help", O::int(0, 32767, "0").internal())
        .option("trans_prompt_em", O::int(0, 32767, "0").internal());
}

fn keys(s: &mut SchemaBuilder) {
    s.section("keys")
        .option("up", O::key(&["KEY_UP", "y", "k"]).doc("Scroll up one line"))
        .option("down", O::key(&["KEY_DOWN", "e", "j"]).doc("Scroll down one line"))
        .option("left", O::key(&["KEY_LEFT", "<"]).doc("Focus the previous link on the line"))
        .option("right", O::key(&["KEY_RIGHT", ">"]).doc("Focus the next link on the line"))
        .option("pgup", O::key(&["KEY_PPAGE", "b"]).doc("Scroll up one page"))
        .option("pgdn", O::key(&["KEY_NPAGE", "f", "SPACE"]).doc("Scroll down one page"))
        .option("home", O::key(&["KEY_HOME", "g"]).doc("Go to page top"))
        .option("end", O::key(&["KEY_END", "G"]).doc("Go to page end"))
        .option("open", O::key(&["KEY_ENTER", "LF", "o"]).doc("Open focused link"))
        .option("open_apropos", O::key(&["a"]).doc("Perform apropos on focused link"))
        .option("open_whatis", O::key(&["w"]).doc("Perform whatis on focused link"))
        .option("sp_open", O::key(&["O"]).doc("Open a manual page by name"))
        .option("sp_apropos", O::key(&["A"]).doc("Perform apropos on a page name"))
        .option("sp_whatis", O::key(&["W"]).doc("Perform whatis on a page name"))
        .option("index", O::key(&["i", "I"]).doc("Go to the index page"))
        .option("back", O::key(&["KEY_BACKSPACE", "BS", "["]).doc("Go back in history"))
        .option("fwrd", O::key(&["]"]).doc("Go forward in history"))
        .option("history", O::key(&["s", "S"]).doc("Show page history"))
        .option("toc", O::key(&["t", "T"]).doc("Show table of contents"))
        .option("search", O::key(&["/"]).doc("Search forward"))
        .option("search_back", O::key(&["?"]).doc("Search backward"))
        .option("search_next", O::key(&["n"]).doc("Go to next search result"))
        .option("search_prev", O::key(&["N"]).doc("Go to previous search result"))
        .option("help", O::key(&["h", "H"]).doc("Show help"))
        .option("quit", O::key(&["q", "Q"]).doc("Exit the program"));
}

fn layout(s: &mut SchemaBuilder) {
    s.section("layout")
        .option("tui", O::bool("true").internal())
        .option("fixedwidth", O::bool("false").internal())
        .option("sbar", O::bool("true").doc("Show the scrollbar"))
        .option("beep", O::bool("true").doc("Beep the terminal on errors"))
        .option("tabstop", O::int(1, 32, "8").doc("Width of a tab stop"))
        .option("width", O::int(0, 400, "80").internal())
        .option("height", O::int(0, 100, "25").internal())
        .option("sbar_width", O::int(0, 100, "1").internal())
        .option("stat_height", O::int(0, 100, "2").internal())
        .option("main_width", O::int(0, 400, "79").internal())
        .option("main_height", O::int(0, 100, "23").internal())
        .option("imm_width_wide", O::int(0, 400, "76").internal())
        .option("imm_width_narrow", O::int(0, 400, "40").internal())
        .option("imm_height_short", O::int(0, 100, "4").internal())
        .option("imm_height_long", O::int(0, 100, "15").internal())
        .option("lmargin", O::int(0, 200, "2").doc("Left margin"))
        .option("rmargin", O::int(0, 200, "2").doc("Right margin"));
}

fn mouse(s: &mut SchemaBuilder) {
    s.section("mouse")
        .option("enable", O::bool("true").doc("Enable mouse support"))
        .option("left_handed", O::bool("false").doc("Swap the left and right buttons"))
        .option("left_click_open", O::bool("false").doc("Open links with a single left click"));
}

fn tcap(s: &mut SchemaBuilder) {
    s.section("tcap")
        .option("colours", O::int(-1, 256, "-1").doc("Number of terminal colours (-1 to detect)"))
        .option("rgb", O::trit("auto").doc("Terminal colours can be redefined"))
        .option("unicode", O::trit("auto").doc("Terminal can display Unicode glyphs"))
        .option("clipboard", O::trit("auto").doc("Terminal supports clipboard access (OSC 52)"))
        .option("italics", O::trit("auto").doc("Terminal can display italics"))
        .option("escdelay", O::int(0, 10000, "25").doc("Escape key delay in milliseconds"));
}

fn capabilities(s: &mut SchemaBuilder) {
    s.section("capabilities")
        .option("http_links", O::bool("true").internal())
        .option("email_links", O::bool("true").internal())
        .option("file_links", O::bool("true").internal())
        .option("hyphenate", O::bool("true").internal())
        .option("justify", O::bool("true").internal())
        .option("sections_on_top", O::bool("true").internal());
}

fn misc(s: &mut SchemaBuilder) {
    s.section("misc")
        .option("program_name", O::wstring("manview").internal())
        .option("program_version", O::wstring(concat!("manview ", env!("CARGO_PKG_VERSION"))).internal())
        .option("config_path", O::absent_string().internal())
        .option("system_type", O::int(0, 3, "0").internal())
        .option("man_path", O::string("/usr/bin/man").doc("Path to the 'man' command"))
        .option("groff_path", O::string("/usr/bin/groff").doc("Path to the 'groff' command"))
        .option("whatis_path", O::string("/usr/bin/whatis").doc("Path to the 'whatis' command"))
        .option("apropos_path", O::string("/usr/bin/apropos").doc("Path to the 'apropos' command"))
        .option("browser_path", O::string("/usr/bin/xdg-open").doc("Web browser used for http(s) links"))
        .option("mailer_path", O::string("/usr/bin/xdg-email").doc("Mail program used for email links"))
        .option("viewer_path", O::string("/usr/bin/xdg-open").doc("Viewer used for local file links"))
        .option("history_size", O::int(1, 0xfffff, "65535").doc("Number of page requests kept in history"))
        .option("global_apropos", O::bool("false").doc("Search all manual sections in apropos"))
        .option("global_whatis", O::bool("false").doc("Search all manual sections in whatis"))
        .option("reset_after_http", O::bool("true").doc("Reset the terminal after opening a web link"))
        .option("reset_after_email", O::bool("true").doc("Reset the terminal after opening an email link"))
        .option("cli_force_color", O::bool("false").doc("Use colour when printing to a non-terminal"));
}
