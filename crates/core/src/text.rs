#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ColorCode {
    /// The legacy `§` formatting character for this color
    pub fn legacy_char(self) -> char {
        use ColorCode::*;
        match self {
            Black => '0',
            DarkBlue => '1',
            DarkGreen => '2',
            DarkAqua => '3',
            DarkRed => '4',
            DarkPurple => '5',
            Gold => '6',
            Gray => '7',
            DarkGray => '8',
            Blue => '9',
            Green => 'a',
            Aqua => 'b',
            Red => 'c',
            LightPurple => 'd',
            Yellow => 'e',
            White => 'f',
        }
    }
}

pub struct TextComponentBuilder {
    component: TextComponent,
}

impl TextComponentBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        let component = TextComponent {
            text: text.into(),
            ..Default::default()
        };
        Self { component }
    }

    pub fn color(mut self, color: ColorCode) -> Self {
        self.component.color = Some(color);
        self
    }

    pub fn bold(mut self, val: bool) -> Self {
        self.component.bold = val;
        self
    }

    pub fn extra(mut self, component: TextComponent) -> Self {
        self.component.extra.push(component);
        self
    }

    pub fn finish(self) -> TextComponent {
        self.component
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct TextComponent {
    pub text: String,
    pub bold: bool,
    pub color: Option<ColorCode>,
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    pub fn colored(text: impl Into<String>, color: ColorCode) -> Self {
        TextComponentBuilder::new(text).color(color).finish()
    }

    /// Concatenated text of this component and its children, without formatting
    pub fn plain_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.extra {
            out.push_str(&child.plain_text());
        }
        out
    }

    /// Text with legacy `§` color codes; what the console prints
    pub fn to_legacy_text(&self) -> String {
        let mut out = String::new();
        if let Some(color) = self.color {
            out.push('§');
            out.push(color.legacy_char());
        }
        if self.bold {
            out.push_str("§l");
        }
        out.push_str(&self.text);
        for child in &self.extra {
            out.push_str(&child.to_legacy_text());
        }
        out
    }
}

impl<S> From<S> for TextComponent
where
    S: Into<String>,
{
    fn from(value: S) -> Self {
        TextComponent {
            text: value.into(),
            ..Default::default()
        }
    }
}
