use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,
    pub error: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub cursor_line_bg: Color,
    pub selection_bg: Color,
    pub linked_line_bg: Color, // Source line targeted by scroll-to-source
    pub function: Color,
    pub type_name: Color,
    pub local_value: Color,  // %names in IR
    pub global_value: Color, // @names in IR
    pub metadata: Color,     // !dbg and friends
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),
    string: Color::Rgb(250, 179, 135),
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    cursor_line_bg: Color::Rgb(50, 50, 70),
    selection_bg: Color::Rgb(69, 71, 90),
    linked_line_bg: Color::Rgb(88, 70, 60),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
    local_value: Color::Rgb(205, 214, 244),
    global_value: Color::Rgb(245, 194, 231),
    metadata: Color::Rgb(108, 112, 134),
};
