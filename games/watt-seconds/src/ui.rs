//! Screen painting for the shop, the upgrade column, and prestige.

use atomic_core::{Font, Rgb565, Surface, draw_text};

use crate::economy::{Generator, HAND_CRANK, LARGE_NUKE};
use crate::format::{format_money, format_money_fixed, format_power, format_power_fixed};
use crate::perks::{CATEGORIES, PerkId};
use crate::state::{Screen, State, WINDOW};

pub const BLACK: Rgb565 = Rgb565::from_rgb(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);
const GREY: Rgb565 = Rgb565::from_rgb(207, 207, 207);

const SCREEN_W: i32 = 240;
const TOP_H: i32 = 20;
const BOX_W: i32 = 220;
const BOX_H: i32 = 40;
const SPACING: i32 = 10;
const LEFT_X: i32 = 10;
const TOP_START: i32 = 190;

// ---------------------------------------------------------------------------
// Stats bar

/// Last-painted stats-bar strings; unchanged text is left alone so the
/// bar survives sixty redraw chances a second.
#[derive(Debug, Default)]
pub struct StatsBar {
    money: String,
    watts: String,
    points: String,
}

impl StatsBar {
    /// Force a full repaint on the next draw.
    pub fn invalidate(&mut self) {
        self.money.clear();
        self.watts.clear();
        self.points.clear();
    }

    pub fn draw(&mut self, screen: &mut dyn Surface, st: &State) {
        let money = format_money_fixed(st.money);
        if money != self.money {
            draw_text(screen, Font::SMALL, "          ", 6, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
            draw_text(screen, Font::SMALL, &money, 6, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
            self.money = money;
            // The points readout sits after the money text, so it moves
            // when that changes width.
            self.points.clear();
        }
        let watts = format_power_fixed(st.total_watts());
        if watts != self.watts {
            let x = SCREEN_W - 6;
            draw_text(screen, Font::SMALL, "       ", x, TOP_H / 2, BLACK, Some(WHITE), 1.0, 0.5);
            draw_text(screen, Font::SMALL, &watts, x, TOP_H / 2, BLACK, Some(WHITE), 1.0, 0.5);
            self.watts = watts;
        }
        if st.prestige_count > 1 {
            let points = format!("{} PC", st.prestige_points);
            if points != self.points {
                let x = 6 + self.money.len() as i32 * Font::SMALL.width + 10;
                draw_text(screen, Font::SMALL, "       ", x, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
                draw_text(screen, Font::SMALL, &points, x, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
                self.points = points;
            }
        }
        if st.gens[LARGE_NUKE].count > 0 {
            draw_text(screen, Font::SMALL, "X: PRESTIGE", SCREEN_W / 2, TOP_H / 2, BLACK, Some(WHITE), 0.5, 0.5);
        }
    }

    pub fn draw_prestige(&mut self, screen: &mut dyn Surface, st: &State) {
        let points = format!("{} PC", st.prestige_points);
        if points != self.points {
            draw_text(screen, Font::SMALL, "       ", 6, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
            draw_text(screen, Font::SMALL, &points, 6, TOP_H / 2, BLACK, Some(WHITE), 0.0, 0.5);
            self.points = points;
        }
        draw_text(screen, Font::SMALL, "Press X to Restart", SCREEN_W / 2, TOP_H / 2, BLACK, Some(WHITE), 0.5, 0.5);
    }
}

// ---------------------------------------------------------------------------
// Screens

/// Paint the screen the cursor is on. The stats bar is invalidated so
/// the caller's next bar draw lands on the fresh background.
pub fn draw_screen(screen: &mut dyn Surface, st: &State, bar: &mut StatsBar) {
    screen.fill(WHITE);
    bar.invalidate();
    match st.screen {
        Screen::Generators => draw_generators(screen, st),
        Screen::Upgrades => draw_upgrades(screen, st),
        Screen::PrestigeIntro => draw_prestige_intro(screen),
        Screen::Prestige => draw_prestige(screen, st),
    }
}

fn draw_generators(screen: &mut dyn Surface, st: &State) {
    let shop = st.shop_len();
    let mut y = TOP_START;
    for row in 0..WINDOW {
        let idx = st.scroll + row;
        if idx >= shop {
            break;
        }
        draw_generator_row(screen, st, idx, row, y);
        y -= BOX_H + SPACING;
    }
}

fn draw_generator_row(screen: &mut dyn Surface, st: &State, idx: usize, row: usize, y: i32) {
    let g = &st.gens[idx];
    let bg = if idx == st.sel { GREY } else { WHITE };
    if idx == st.sel {
        screen.fill_rect(LEFT_X, y, BOX_W, BOX_H, GREY);
    }
    screen.rect(LEFT_X, y, BOX_W, BOX_H, BLACK);
    if idx != HAND_CRANK {
        // Stub out to the upgrade column off the right edge.
        screen.line(LEFT_X + BOX_W, y + BOX_H / 2, SCREEN_W - 1, y + BOX_H / 2, BLACK);
    }
    if row > 0 {
        let cx = LEFT_X + BOX_W / 2;
        screen.line(cx, y + BOX_H, cx, y + BOX_H + SPACING, BLACK);
    }

    let masked = st.masked(idx);
    let name = if masked { "????????" } else { g.def.name };
    draw_text(screen, Font::SMALL, name, SCREEN_W / 2, y + 4, BLACK, Some(bg), 0.5, 0.0);

    let (cost, watts) = row_labels(st, g, masked, idx);
    if !cost.is_empty() {
        draw_text(screen, Font::SMALL, &cost, LEFT_X + 4, y + BOX_H - 3, BLACK, Some(bg), 0.0, 1.0);
    }
    draw_text(screen, Font::SMALL, &watts, LEFT_X + BOX_W - 4, y + BOX_H - 3, BLACK, Some(bg), 1.0, 1.0);
}

/// Bottom-corner labels for a shop row: price on the left, output on
/// the right.
fn row_labels(st: &State, g: &Generator, masked: bool, idx: usize) -> (String, String) {
    if idx == HAND_CRANK {
        return (String::new(), format_power(g.unit_watts(&st.perks)));
    }
    if masked {
        return ("???".to_string(), "???".to_string());
    }
    let per_unit = g.unit_watts(&st.perks) * g.upgrade_multiplier();
    let watts = if g.count > 0 {
        format!("{} +{}", format_power(g.power_output(&st.perks)), format_power(per_unit))
    } else {
        format!("({})", format_power(per_unit))
    };
    (format_money(g.current_cost()), watts)
}

fn draw_upgrades(screen: &mut dyn Surface, st: &State) {
    let g = &st.gens[st.sel];
    let upgrades = g.upgrades();
    let mut y = TOP_START;
    for row in 0..WINDOW {
        let idx = st.upg_scroll + row;
        if idx >= upgrades.len() {
            break;
        }
        let u = &upgrades[idx];
        let bg = if idx == st.upg_sel { GREY } else { WHITE };
        if idx == st.upg_sel {
            screen.fill_rect(LEFT_X, y, BOX_W, BOX_H, GREY);
        }
        screen.rect(LEFT_X, y, BOX_W, BOX_H, BLACK);
        if idx == 0 {
            // Stub back to the generator list off the left edge.
            screen.line(0, y + BOX_H / 2, LEFT_X, y + BOX_H / 2, BLACK);
        }
        draw_text(screen, Font::SMALL, u.name, SCREEN_W / 2, y + 4, BLACK, Some(bg), 0.5, 0.0);
        let cost = if g.upgrade_bought(idx) {
            "BOUGHT".to_string()
        } else {
            format_money(g.upgrade_cost(idx))
        };
        draw_text(screen, Font::SMALL, &cost, LEFT_X + 4, y + BOX_H - 3, BLACK, Some(bg), 0.0, 1.0);
        let gain = format!("+{}%", u.mult_percent);
        draw_text(screen, Font::SMALL, &gain, LEFT_X + BOX_W - 4, y + BOX_H - 3, BLACK, Some(bg), 1.0, 1.0);
        y -= BOX_H + SPACING;
    }
}

fn draw_prestige(screen: &mut dyn Surface, st: &State) {
    match st.cat_open {
        None => draw_perk_categories(screen, st),
        Some(cat) => draw_perk_list(screen, st, cat),
    }
}

fn draw_perk_categories(screen: &mut dyn Surface, st: &State) {
    let mut y = TOP_START;
    for (idx, (name, _)) in CATEGORIES.iter().enumerate().take(WINDOW) {
        let bg = if idx == st.cat_sel { GREY } else { WHITE };
        if idx == st.cat_sel {
            screen.fill_rect(LEFT_X, y, BOX_W, BOX_H, GREY);
        }
        screen.rect(LEFT_X, y, BOX_W, BOX_H, BLACK);
        draw_text(screen, Font::SMALL, name, SCREEN_W / 2, y + 4, BLACK, Some(bg), 0.5, 0.0);
        draw_text(screen, Font::SMALL, "Enter ->", LEFT_X + BOX_W - 4, y + BOX_H - 3, BLACK, Some(bg), 1.0, 1.0);
        y -= BOX_H + SPACING;
    }
}

fn draw_perk_list(screen: &mut dyn Surface, st: &State, cat: usize) {
    let ids = CATEGORIES[cat].1;
    let mut y = TOP_START;
    for (idx, &id) in ids.iter().enumerate().take(WINDOW) {
        let perk = st.perks.get(id);
        let bg = if idx == st.perk_sel { GREY } else { WHITE };
        if idx == st.perk_sel {
            screen.fill_rect(LEFT_X, y, BOX_W, BOX_H, GREY);
        }
        screen.rect(LEFT_X, y, BOX_W, BOX_H, BLACK);
        draw_text(screen, Font::SMALL, perk.name, SCREEN_W / 2, y + 4, BLACK, Some(bg), 0.5, 0.0);
        let cost = if perk.maxed() {
            "MAX".to_string()
        } else {
            format!("{} PC", perk.next_cost())
        };
        draw_text(screen, Font::SMALL, &cost, LEFT_X + 4, y + BOX_H - 3, BLACK, Some(bg), 0.0, 1.0);
        let effect = effect_label(st, id);
        draw_text(screen, Font::SMALL, &effect, LEFT_X + BOX_W - 4, y + BOX_H - 3, BLACK, Some(bg), 1.0, 1.0);
        y -= BOX_H + SPACING;
    }
}

/// What the next copy of a perk brings the total to.
fn effect_label(st: &State, id: PerkId) -> String {
    let bought = st.perks.get(id).bought;
    match id {
        PerkId::SolarBoost => format!("{}x", (bought + 1) * 10),
        PerkId::GlobalBoost => format!("+{}%", (bought + 1) * 25),
        PerkId::StartCash => format_money((bought + 1) as f64 * 10_000_000.0),
    }
}

fn draw_prestige_intro(screen: &mut dyn Surface) {
    const LINES: &[&str] = &[
        "Congratulations!",
        "",
        "You bought the Large Nuclear",
        "Reactor and beat the grid.",
        "",
        "Restarting now builds the",
        "Research Lab: money gain is",
        "doubled and new machines",
        "appear in the shop.",
        "",
        "Later restarts earn prestige",
        "points to spend on perks.",
        "",
        "Press X to continue...",
    ];
    let mut y = 16;
    for line in LINES {
        screen.text(Font::SMALL, line, 8, y, BLACK, Some(WHITE));
        y += 16;
    }
}

// ---------------------------------------------------------------------------
// Title and story

pub fn draw_title(screen: &mut dyn Surface, version: &str) {
    screen.fill(WHITE);
    screen.text(Font::SMALL, version, 6, 6, BLACK, Some(WHITE));
    draw_text(screen, Font::LARGE, "Watt Seconds", SCREEN_W / 2, 110, BLACK, Some(WHITE), 0.5, 0.5);
    draw_text(screen, Font::SMALL, "Press A to Start", SCREEN_W / 2, 135, BLACK, Some(WHITE), 0.5, 0.0);
    draw_text(screen, Font::SMALL, "by Henry Gurney", SCREEN_W / 2, 220, BLACK, Some(WHITE), 0.5, 0.0);
}

pub fn draw_story(screen: &mut dyn Surface) {
    const LINES: &[&str] = &[
        "Decades have passed and",
        "the grid has collapsed.",
        "Electricity now costs $1",
        "per watt-second...",
        "a 1,400,000,000% increase.",
        "",
        "You have no money, no job,",
        "and no other way to earn.",
        "",
        "You have just a hand crank,",
        "turn it & sell those watts!",
        "",
        "Press A to Crank...",
    ];
    screen.fill(WHITE);
    let mut y = 16;
    for line in LINES {
        screen.text(Font::SMALL, line, 8, y, BLACK, Some(WHITE));
        y += 16;
    }
}
