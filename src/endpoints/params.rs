//! Query and path parameters shared by endpoint families

use std::fmt;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Value as it appears in URLs
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Amount of detail in returned objects (`extended` query parameter)
    InfoLevel {
        Min => "min",
        Full => "full",
        Metadata => "metadata",
    }
}

wire_enum! {
    /// Window of the "most played/watched/collected" charts
    TimePeriod {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
        All => "all",
    }
}

wire_enum! {
    CommentSort {
        Newest => "newest",
        Oldest => "oldest",
        Likes => "likes",
        Replies => "replies",
        Highest => "highest",
        Lowest => "lowest",
        Plays => "plays",
    }
}

wire_enum! {
    ListType {
        All => "all",
        Personal => "personal",
        Official => "official",
        Watchlists => "watchlists",
        Recommendations => "recommendations",
    }
}

wire_enum! {
    ListSort {
        Popular => "popular",
        Likes => "likes",
        Comments => "comments",
        Items => "items",
        Added => "added",
        Updated => "updated",
    }
}

wire_enum! {
    /// Filter for playback progress; `All` adds no path segment
    WatchedType {
        Movies => "movies",
        Episodes => "episodes",
        All => "",
    }
}

wire_enum! {
    CollectableType {
        Movies => "movies",
        Shows => "shows",
    }
}

wire_enum! {
    /// Filter for history, ratings and watchlist; `All` adds no path segment
    ContentType {
        Movies => "movies",
        Shows => "shows",
        Seasons => "seasons",
        Episodes => "episodes",
        All => "",
    }
}
