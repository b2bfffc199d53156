/// Services that have an icon. Anything else resolves to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    GitHub,
    LinkedIn,
    Email,
}

impl Service {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::LinkedIn => "linkedin",
            Self::Email => "email",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "github" => Some(Self::GitHub),
            "linkedin" => Some(Self::LinkedIn),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    fn paths(self) -> &'static [&'static str] {
        match self {
            Self::GitHub => &[
                "M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22",
            ],
            Self::LinkedIn => &[
                "M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z",
                "M2 9h4v12H2z",
                "M4 2a2 2 0 1 1 0 4a2 2 0 1 1 0-4z",
            ],
            Self::Email => &[
                "M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z",
                "M22 6l-10 7L2 6",
            ],
        }
    }
}

pub const ICON_VIEW_BOX: &str = "0 0 24 24";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Icon {
    pub service: Service,
    pub size: u32,
    pub paths: &'static [&'static str],
}

pub fn resolve_icon(name: &str, size: u32) -> Option<Icon> {
    let service = Service::from_name(name)?;
    Some(Icon {
        service,
        size,
        paths: service.paths(),
    })
}
