// Static character catalog
//
// The characters shown on the home page and in chat-video are fixed at build
// time. Each one exposes numbered images and videos that the chat UI requests
// by (characterId, mediaId).

/// Kind of media requested from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Query parameter carrying the media id.
    pub fn id_param(self) -> &'static str {
        match self {
            MediaKind::Image => "imageId",
            MediaKind::Video => "videoId",
        }
    }

    /// Response field carrying the resolved URL.
    pub fn url_field(self) -> &'static str {
        match self {
            MediaKind::Image => "imageUrl",
            MediaKind::Video => "videoUrl",
        }
    }

    pub fn missing_message(self) -> &'static str {
        match self {
            MediaKind::Image => "characterId et imageId sont requis",
            MediaKind::Video => "characterId et videoId sont requis",
        }
    }

    pub fn not_numeric_message(self) -> &'static str {
        match self {
            MediaKind::Image => "characterId et imageId doivent être des nombres",
            MediaKind::Video => "characterId et videoId doivent être des nombres",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            MediaKind::Image => "Image non trouvée pour ce personnage",
            MediaKind::Video => "Vidéo non trouvée pour ce personnage",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub photo_url: String,
    pub description: String,
    pub voice_id: String,
    pub images: Vec<(i32, String)>,
    pub videos: Vec<(i32, String)>,
}

impl Character {
    pub fn media(&self, kind: MediaKind, media_id: i32) -> Option<&str> {
        let table = match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        };
        table
            .iter()
            .find(|(id, _)| *id == media_id)
            .map(|(_, url)| url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
}

impl CharacterCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn find(&self, character_id: i32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == character_id)
    }

    /// URL of media `media_id` of `character_id`, if both exist.
    pub fn resolve(&self, kind: MediaKind, character_id: i32, media_id: i32) -> Option<&str> {
        self.find(character_id)?.media(kind, media_id)
    }

    /// The characters shipped with the application.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(BuiltinCharacter::to_character).collect())
    }
}

struct BuiltinCharacter {
    id: i32,
    name: &'static str,
    photo_url: &'static str,
    description: &'static str,
    voice_id: &'static str,
    images: [&'static str; 3],
    videos: [&'static str; 3],
}

impl BuiltinCharacter {
    fn to_character(&self) -> Character {
        let numbered = |urls: &[&'static str; 3]| -> Vec<(i32, String)> {
            urls.iter()
                .enumerate()
                .map(|(i, url)| (i as i32 + 1, url.to_string()))
                .collect()
        };
        Character {
            id: self.id,
            name: self.name.to_string(),
            photo_url: self.photo_url.to_string(),
            description: self.description.to_string(),
            voice_id: self.voice_id.to_string(),
            images: numbered(&self.images),
            videos: numbered(&self.videos),
        }
    }
}

const BUILTIN: &[BuiltinCharacter] = &[
    BuiltinCharacter {
        id: 1,
        name: "Emma",
        photo_url: "/avatars/chinese.png",
        description: "Une jeune femme douce et attentionnée",
        voice_id: "EXAVITQu4vr4xnSDxMaL",
        images: ["/avatars/emma/1.jpg", "/avatars/emma/2.jpg", "/avatars/emma/3.jpg"],
        videos: [
            "/videos/emma/danse.mp4",
            "/videos/emma/twerk.mp4",
            "/videos/emma/bisou.mp4",
        ],
    },
    BuiltinCharacter {
        id: 2,
        name: "Sophie",
        photo_url: "/avatars/femme-2.png",
        description: "Une femme élégante et sophistiquée",
        voice_id: "lvQdCgwZfBuOzxyV5pxu",
        images: ["/avatars/sophie/1.jpg", "/avatars/sophie/2.jpg", "/avatars/sophie/3.jpg"],
        videos: [
            "/videos/sophie/danse.mp4",
            "/videos/sophie/twerk.mp4",
            "/videos/sophie/bisou.mp4",
        ],
    },
    BuiltinCharacter {
        id: 3,
        name: "Luna",
        photo_url: "/avatars/luna.png",
        description: "Une femme mystérieuse et envoûtante",
        voice_id: "ThT5KcBeYPX3keUQqHPh",
        images: ["/avatars/luna/1.jpg", "/avatars/luna/2.jpg", "/avatars/luna/bisou-3.mp4"],
        videos: [
            "/avatars/luna/déshabillage.mp4",
            "/avatars/luna/twerk.mp4",
            "/avatars/luna/remue-poitrine.mp4",
        ],
    },
    BuiltinCharacter {
        id: 4,
        name: "Chloé",
        photo_url: "/avatars/selfie-manucure.png",
        description: "Une jeune femme pétillante et spontanée",
        voice_id: "jBpfuIE2acCO8z3wKNLl",
        images: ["/avatars/chloe/1.jpg", "/avatars/chloe/2.jpg", "/avatars/chloe/3.jpg"],
        videos: [
            "/videos/chloe/danse.mp4",
            "/videos/chloe/deshabillage.mp4",
            "/videos/chloe/bisou.mp4",
        ],
    },
    BuiltinCharacter {
        id: 5,
        name: "Jade",
        photo_url: "/avatars/white.png",
        description: "Une femme confiante et charismatique",
        voice_id: "ZYOBieLaunTiQrTrvNQq",
        images: ["/avatars/jade/1.jpg", "/avatars/jade/2.jpg", "/avatars/jade/3.jpg"],
        videos: [
            "/videos/jade/danse.mp4",
            "/videos/jade/deshabillage.mp4",
            "/videos/jade/bisou.mp4",
        ],
    },
    BuiltinCharacter {
        id: 6,
        name: "Léa",
        photo_url: "/avatars/brune.jpg",
        description: "Une femme chaleureuse et bienveillante",
        voice_id: "pFZP5JQG7iQjIQuC4Bku",
        images: ["/avatars/lea/1.jpg", "/avatars/lea/2.jpg", "/avatars/lea/3.jpg"],
        videos: [
            "/videos/lea/danse.mp4",
            "/videos/lea/deshabillage.mp4",
            "/videos/lea/bisou.mp4",
        ],
    },
    BuiltinCharacter {
        id: 7,
        name: "Elora",
        photo_url: "/avatars/mamacita.jpg",
        description: "Une femme chaleureuse et bienveillante",
        voice_id: "pFZP5JQG7iQjIQuC4Bku",
        images: ["/avatars/mamacita.jpg", "/avatars/elora/2.jpg", "/avatars/elora/3.jpg"],
        videos: [
            "/videos/elora/danse.mp4",
            "/videos/elora/deshabillage.mp4",
            "/videos/elora/bisou.mp4",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = CharacterCatalog::builtin();
        let mut ids: Vec<i32> = catalog.characters().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.characters().len());
    }

    #[test]
    fn test_resolve_builtin_media() {
        let catalog = CharacterCatalog::builtin();
        assert_eq!(
            catalog.resolve(MediaKind::Image, 1, 1),
            Some("/avatars/emma/1.jpg")
        );
        assert_eq!(
            catalog.resolve(MediaKind::Video, 2, 3),
            Some("/videos/sophie/bisou.mp4")
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = CharacterCatalog::builtin();
        assert_eq!(catalog.resolve(MediaKind::Image, 99, 1), None);
        assert_eq!(catalog.resolve(MediaKind::Image, 1, 4), None);
        assert_eq!(catalog.resolve(MediaKind::Video, 1, 0), None);
    }

    #[test]
    fn test_character_without_media() {
        let catalog = CharacterCatalog::new(vec![Character {
            id: 10,
            name: "Nova".to_string(),
            photo_url: "/avatars/nova.png".to_string(),
            description: String::new(),
            voice_id: String::new(),
            images: vec![(1, String::new())],
            videos: Vec::new(),
        }]);

        assert_eq!(catalog.resolve(MediaKind::Image, 10, 1), None);
        assert_eq!(catalog.resolve(MediaKind::Video, 10, 1), None);
    }
}
