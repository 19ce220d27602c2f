use serde::{Deserialize, Deserializer};

/// Win counts as embedded in a profile page, e.g.
/// `{"overall":42,"factions":[{"slug":"NR","count":10}]}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileStats {
    #[serde(deserialize_with = "null_as_default")]
    pub overall: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub factions: Vec<FactionCount>,
}

impl ProfileStats {
    pub fn faction(&self, slug: &str) -> Option<u32> {
        self.factions
            .iter()
            .find(|faction| &*faction.slug == slug)
            .map(|faction| faction.count)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FactionCount {
    #[serde(deserialize_with = "null_as_default")]
    pub slug: Box<str>,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
}

/// Pages write `null` for empty values, e.g. `"factions":null` without games.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}
