//! Text rendering of player state and battle outcomes.

use colored::Colorize;
use qk_engine::battle::DefeatPenalty;
use qk_engine::item::{self, ItemUse};
use qk_engine::{LevelUp, Resolution, TurnEvent, TurnOutcome, VictoryReward};

/// A fixed-width bar such as `[#######-------] 35/80 HP`.
pub fn bar(current: u32, maximum: u32, width: usize, unit: &str) -> String {
    let maximum = maximum.max(1);
    let current = current.min(maximum);
    let filled = (width as u64 * u64::from(current) / u64::from(maximum)) as usize;
    format!(
        "[{}{}] {current}/{maximum} {unit}",
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}

pub fn health_bar(hp: u32, max_hp: u32, width: usize) -> String {
    let text = bar(hp, max_hp, width, "HP");
    if u64::from(hp) * 4 <= u64::from(max_hp) {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub fn shield_bar(points: u32) -> String {
    bar(points, 3, 9, "SP").cyan().to_string()
}

/// Lines describing one turn.
pub fn turn_lines(outcome: &TurnOutcome, enemy_name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    match &outcome.event {
        TurnEvent::Retry { hint, .. } => lines.push(hint.yellow().to_string()),
        TurnEvent::Hit {
            damage,
            score_gained,
            ..
        } => {
            lines.push(format!("{} You deal {damage} damage!", "Correct!".green().bold()));
            lines.push(format!("Score +{score_gained}"));
        }
        TurnEvent::Miss {
            correct_answer,
            out_of_attempts,
            blocked,
            damage_taken,
        } => {
            if *out_of_attempts {
                lines.push(format!("Out of attempts. The correct answer was: {correct_answer}"));
            } else {
                lines.push(format!(
                    "{} The correct answer was: {correct_answer}",
                    "Wrong answer!".red().bold()
                ));
            }
            if *blocked {
                lines.push("Your shield blocked the attack!".cyan().to_string());
            } else {
                lines.push(format!("{enemy_name} hits you for {damage_taken} damage!"));
            }
        }
        TurnEvent::ItemUsed(used) => lines.push(item_use_line(used)),
        TurnEvent::Purchased(item) => lines.push(format!("Purchased {}!", item.name)),
        TurnEvent::Forfeited => lines.push("You forfeited the battle.".to_string()),
    }

    lines.extend(outcome.level_ups.iter().map(level_up_line));

    match &outcome.resolution {
        Some(Resolution::Victory(reward)) => {
            lines.insert(0, format!("{} You defeated the {enemy_name}!", "Victory!".green().bold()));
            lines.extend(reward_lines(reward));
        }
        Some(Resolution::Defeat(penalty)) => {
            lines.push(format!("{} The {enemy_name} defeated you...", "Defeat!".red().bold()));
            lines.extend(penalty_lines(penalty));
        }
        None => {}
    }
    lines
}

pub fn item_use_line(used: &ItemUse) -> String {
    match used {
        ItemUse::Healed { amount, hp } => {
            format!("You used a Healing Potion and restored {amount} HP ({hp} HP now).")
        }
        ItemUse::Shielded { points } => {
            format!("Shield raised: {points} shield points to block hits.")
        }
    }
}

pub fn level_up_line(level_up: &LevelUp) -> String {
    let mut line = format!(
        "{} Level {} ({}). Next level at {} XP.",
        "Level up!".yellow().bold(),
        level_up.level,
        level_up.upgrade,
        level_up.next_threshold
    );
    if level_up.healed > 0 {
        line.push_str(&format!(" Restored {} HP.", level_up.healed));
    }
    line
}

pub fn reward_lines(reward: &VictoryReward) -> Vec<String> {
    let mut lines = vec![format!("XP +{}", reward.xp)];
    if reward.bonus_gold > 0 {
        lines.push(format!(
            "Gold +{} + {} (level) + {} (bonus) = {}",
            reward.base_gold,
            reward.level_gold,
            reward.bonus_gold,
            reward.gold()
        ));
    } else {
        lines.push(format!(
            "Gold +{} + {} (level bonus) = {}",
            reward.base_gold,
            reward.level_gold,
            reward.gold()
        ));
    }
    if let Some(key) = reward.item {
        let name = item::find(key).map_or(key, |item| item.name);
        lines.push(format!("You found a {name}!"));
    }
    lines
}

pub fn penalty_lines(penalty: &DefeatPenalty) -> Vec<String> {
    let mut lines = Vec::new();
    if penalty.rolled_back {
        lines.push("No score or XP recorded due to defeat.".to_string());
    }
    if penalty.gold_lost > 0 {
        lines.push(format!("Lost {} gold as penalty.", penalty.gold_lost));
    }
    lines.push(format!("Recovered to {} HP.", penalty.recovered_hp));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use qk_engine::{BattleState, Upgrade};

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(40, 80, 10, "HP"), "[#####-----] 40/80 HP");
        assert_eq!(bar(0, 80, 4, "HP"), "[----] 0/80 HP");
        assert_eq!(bar(999, 80, 4, "HP"), "[####] 80/80 HP");
        assert_eq!(bar(0, 0, 2, "SP"), "[--] 0/1 SP");
    }

    #[test]
    fn defeat_lines_report_penalty() {
        let outcome = TurnOutcome {
            event: TurnEvent::Miss {
                correct_answer: "4".into(),
                out_of_attempts: false,
                blocked: false,
                damage_taken: 6,
            },
            level_ups: Vec::new(),
            resolution: Some(Resolution::Defeat(DefeatPenalty {
                rolled_back: true,
                gold_lost: 25,
                recovered_hp: 20,
            })),
            state: BattleState::Defeat,
        };
        let text = turn_lines(&outcome, "Slime").join("\n");
        assert!(text.contains("Slime hits you for 6 damage!"));
        assert!(text.contains("Lost 25 gold"));
        assert!(text.contains("Recovered to 20 HP."));
    }

    #[test]
    fn reward_lines_name_dropped_item() {
        let reward = VictoryReward {
            xp: 10,
            base_gold: 25,
            level_gold: 3,
            bonus_gold: 0,
            item: Some("potion"),
        };
        let text = reward_lines(&reward).join("\n");
        assert!(text.contains("Gold +25 + 3 (level bonus) = 28"));
        assert!(text.contains("Healing Potion"));
    }

    #[test]
    fn level_up_line_mentions_upgrade() {
        let line = level_up_line(&LevelUp {
            level: 2,
            upgrade: Upgrade::Damage,
            healed: 12,
            next_threshold: 335,
        });
        assert!(line.contains("Level 2"));
        assert!(line.contains("+3 Damage"));
        assert!(line.contains("Restored 12 HP"));
    }
}
