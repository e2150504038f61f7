//! Story text: the intro and one chapter per band of levels.

use qk_engine::Difficulty;

pub const INTRO: &str = "\
In the twilight between stars and sorcery, the Kingdom of Quicx once
thrived. Magic flowed through circuits and steel hummed with ancient runes.
Then the Astral Rift tore open the skies, and beings of light and shadow
poured through to devour machine and man alike.

From the ruins rose the Quicx Knights, chosen not by birth but by their
will to bind the fragments of both realms. Each knight swore the Astral
Oath: \"To stand between chaos and creation, until the stars fall silent.\"

You are one such knight, reborn from stardust and steel. Your memories are
fractured. Every victory restores a piece of who you were and reveals the
truth behind the Rift.";

/// A story chapter.
pub struct Chapter {
    pub name: &'static str,
    pub first_level: u32,
    /// Last level of the chapter; `None` for the open-ended final chapter.
    pub last_level: Option<u32>,
    lines: [&'static str; 5],
}

impl Chapter {
    fn contains(&self, level: u32) -> bool {
        level >= self.first_level && self.last_level.is_none_or(|last| level <= last)
    }

    /// Flavour text shown before a battle at `difficulty`.
    pub fn line(&self, difficulty: Difficulty) -> &'static str {
        let index = match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Boss => 3,
            Difficulty::Random => 4,
        };
        self.lines[index]
    }
}

pub const CHAPTERS: [Chapter; 5] = [
    Chapter {
        name: "Chapter 1: Awakening Shadows",
        first_level: 1,
        last_level: Some(5),
        lines: [
            "The Rift's echoes are faint here. Slimes born of corrupted stardust test your resolve.",
            "Goblins twisted by the Rift's chaos guard the outskirts, probing your fractured mind.",
            "Orcs, hulking remnants of ancient sorcery, block your path.",
            "A primal Dragon stirs beneath the foundations of Quicx. Face it to awaken the Oath.",
            "The Rift's unpredictability takes shape as a whirlwind of foes. Adapt and conquer.",
        ],
    },
    Chapter {
        name: "Chapter 2: Fractured Realms",
        first_level: 6,
        last_level: Some(10),
        lines: [
            "Deeper in the Rift, slimes pulse with dark energy. Your blade hums louder.",
            "Goblin warbands question you about the secrets of the Astral Oath.",
            "Orcs wield corrupted runes that blur the line between magic and machine.",
            "An elder Dragon guards forbidden knowledge. Defeat it to mend a fragment of your soul.",
            "Foes from every realm converge, and the Rift's origin flickers into view.",
        ],
    },
    Chapter {
        name: "Chapter 3: Echoes of Eternity",
        first_level: 11,
        last_level: Some(15),
        lines: [
            "Slimes infused with eternal light flicker like dying stars.",
            "Goblin shamans chant riddles from across time.",
            "Orc warlords in void-steel embody the Rift's destructive force.",
            "A cosmic Dragon, weaver of realities, challenges your very existence.",
            "The Rift's tapestry unravels into a storm of adversaries.",
        ],
    },
    Chapter {
        name: "Chapter 4: The Final Spark",
        first_level: 16,
        last_level: Some(20),
        lines: [
            "Slimes, now vessels of pure astral energy, whisper forgotten lore.",
            "Enlightened goblins pose questions that bridge worlds.",
            "Orcs tempered by cosmic fire stand as the ultimate trial of strength and wit.",
            "The Rift's progenitor, a primordial Dragon, demands the ultimate sacrifice.",
            "All realms collide. Your choices will decide the fate of Quicx.",
        ],
    },
    Chapter {
        name: "Chapter 5: Beyond the Oath",
        first_level: 21,
        last_level: None,
        lines: [
            "Transcendent slimes challenge even the mightiest knights.",
            "Goblins of legend share wisdom from the stars themselves.",
            "Orcs forged in eternal conflict push the limits of your resolve.",
            "Dragons of myth, unbound by time, test the eternity of your Oath.",
            "The void itself takes the shape of endless foes.",
        ],
    },
];

/// The chapter for a player level. Levels below 1 read as chapter 1.
pub fn chapter_for(level: u32) -> &'static Chapter {
    CHAPTERS
        .iter()
        .find(|c| c.contains(level))
        .unwrap_or(&CHAPTERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapters_cover_level_bands() {
        assert_eq!(chapter_for(0).name, CHAPTERS[0].name);
        assert_eq!(chapter_for(1).name, CHAPTERS[0].name);
        assert_eq!(chapter_for(5).name, CHAPTERS[0].name);
        assert_eq!(chapter_for(6).name, CHAPTERS[1].name);
        assert_eq!(chapter_for(15).name, CHAPTERS[2].name);
        assert_eq!(chapter_for(20).name, CHAPTERS[3].name);
        assert_eq!(chapter_for(21).name, CHAPTERS[4].name);
        assert_eq!(chapter_for(500).name, CHAPTERS[4].name);
    }

    #[test]
    fn every_difficulty_has_a_line() {
        for chapter in &CHAPTERS {
            for &d in Difficulty::all() {
                assert!(!chapter.line(d).is_empty());
            }
        }
    }
}
