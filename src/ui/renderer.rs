/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws.
///
/// The renderer only reads game state; every mutation happens in the
/// sim layer before `render` is called.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::mineral::Mineral;
use crate::domain::player::Direction;
use crate::domain::tile::{DoorKind, DoorState, Tile};
use crate::sim::gen::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::session::{GameSession, Phase};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so the
    /// inter-row gap pixels on VTE terminals match the cleared color.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 16, b: 24 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Cell {
        let bg = match bg {
            Color::Reset => Cell::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }

    /// Fill a full row with a background color.
    fn fill_row(&mut self, y: usize, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', fg, bg));
        }
    }
}

// ── Renderer ──

/// Each game cell = 2 terminal columns (roughly square on most fonts).
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, session: &GameSession) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition
        let phase_changed = self.last_phase != Some(session.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(session.phase);
        }

        self.front.clear();

        match session.phase {
            Phase::Title => self.compose_title(session),
            Phase::Playing => self.compose_game(session),
            Phase::GameComplete => self.compose_game_complete(session),
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame. NOT ResetColor:
        // the terminal default may differ from BASE_BG and cause line
        // artifacts between rows.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                let mut buf = [0u8; 4];
                queue!(self.writer, Print(&*cell.ch.encode_utf8(&mut buf)))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Playing ──

    fn compose_game(&mut self, s: &GameSession) {
        let hud_bg = Color::Rgb { r: 30, g: 25, b: 55 };
        self.front.fill_row(HUD_ROW, Color::White, hud_bg);
        let hud = format!(
            " Depth {:<2}/{}   Minerals:{:<5}   [E] Inventory ",
            s.current_level,
            s.max_level,
            s.player.total_collected(),
        );
        self.front.put_str(0, HUD_ROW, &hud, Color::White, hud_bg);

        // ── Grid ──
        for ((gx, gy), tile) in s.grid().cells() {
            let col = gx * CELL_W;
            let row = MAP_ROW + gy;
            if s.player.x == gx && s.player.y == gy {
                self.compose_player(s, col, row);
            } else {
                self.compose_tile(s, tile, col, row);
            }
        }

        // ── Message bar ──
        let msg_row = MAP_ROW + GRID_HEIGHT + 1;
        if !s.message.is_empty() && msg_row < self.front.height {
            let banner = Color::Rgb { r: 200, g: 180, b: 50 };
            self.front.fill_row(msg_row, Color::Black, banner);
            self.front.put_str(0, msg_row, &format!(" ◈ {} ", s.message), Color::Black, banner);
        }

        // ── Help bar ──
        let help_row = MAP_ROW + GRID_HEIGHT + 3;
        if help_row < self.front.height {
            let help = " Arrows/WASD: mine & move   E: inventory   ESC: quit";
            self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }

        if s.inventory_open {
            self.compose_inventory(s);
        }
    }

    fn compose_player(&mut self, s: &GameSession, col: usize, row: usize) {
        let arrow = match s.player.facing {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        };
        let bg = Color::Rgb { r: 60, g: 60, b: 80 };
        self.front.set(col, row, Cell::new('@', Color::White, bg));
        self.front.set(col + 1, row, Cell::new(arrow, Color::Rgb { r: 255, g: 220, b: 50 }, bg));
    }

    /// Two terminal columns per tile: glyph on the left, HP bar glyph
    /// on the right once the tile has taken damage.
    fn compose_tile(&mut self, s: &GameSession, tile: Tile, col: usize, row: usize) {
        let (ch, fg, bg) = match tile {
            Tile::Mined => ('·', Color::Rgb { r: 70, g: 70, b: 80 }, Cell::BASE_BG),
            Tile::Ground { .. } => {
                let c = ground_color(s.current_level);
                ('▒', c, Color::Rgb { r: 60, g: 40, b: 20 })
            }
            Tile::Ore { mineral, .. } => {
                ('◆', mineral_color(mineral), Color::Rgb { r: 45, g: 38, b: 28 })
            }
            Tile::Door { kind: DoorKind::Prev, .. } => {
                ('O', Color::Rgb { r: 80, g: 230, b: 230 }, Color::Rgb { r: 10, g: 50, b: 50 })
            }
            Tile::Door { kind: DoorKind::Next, state: DoorState::Locked, .. } => {
                ('▐', Color::Rgb { r: 200, g: 60, b: 60 }, Color::Rgb { r: 70, g: 10, b: 10 })
            }
            Tile::Door { kind: DoorKind::Next, state: DoorState::Open, .. } => {
                ('▐', Color::Rgb { r: 255, g: 215, b: 0 }, Color::Rgb { r: 80, g: 60, b: 0 })
            }
        };
        self.front.set(col, row, Cell::new(ch, fg, bg));

        match tile.hp_bar() {
            Some((hp, max_hp)) if hp < max_hp => {
                self.front.set(col + 1, row, hp_bar_cell(hp, max_hp, bg));
            }
            _ => {
                // Undamaged: repeat the glyph for a solid-looking tile
                let ch2 = if matches!(tile, Tile::Ore { .. }) { ' ' } else { ch };
                self.front.set(col + 1, row, Cell::new(ch2, fg, bg));
            }
        }
    }

    /// Inventory panel: all ten minerals in canonical order, zero
    /// counts included.
    fn compose_inventory(&mut self, s: &GameSession) {
        let box_w = 26_usize;
        let box_h = Mineral::ALL.len() + 4;
        let box_x = (GRID_WIDTH * CELL_W).saturating_sub(box_w) / 2;
        let box_y = MAP_ROW + (GRID_HEIGHT.saturating_sub(box_h)) / 2;
        let panel_bg = Color::Rgb { r: 35, g: 35, b: 45 };

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::new(' ', Color::White, panel_bg));
            }
        }

        let gold = Color::Rgb { r: 255, g: 220, b: 50 };
        self.front.put_str(box_x + 2, box_y + 1, "── Inventory ──", gold, panel_bg);

        for (i, mineral) in Mineral::ALL.iter().enumerate() {
            let row = box_y + 3 + i;
            let count = s.player.count(*mineral);
            self.front.put_str(box_x + 2, row, mineral.name(), mineral_color(*mineral), panel_bg);
            let count_str = format!(": {count}");
            self.front.put_str(box_x + 13, row, &count_str, Color::White, panel_bg);
        }
    }

    // ── Static screens ──

    fn compose_title(&mut self, s: &GameSession) {
        let title = [
            r"   ___             ___       _                ",
            r"  / _ \  _ _  ___ |   \  ___| |__ __ ___  _ _ ",
            r" | (_) || '_|/ -_)| |) |/ -_) |\ V // -_)| '_|",
            r"  \___/ |_|  \___||___/ \___|_| \_/ \___||_|  ",
        ];
        for (i, line) in title.iter().enumerate() {
            self.front.put_str(2, 2 + i, line, Color::Rgb { r: 255, g: 200, b: 50 }, Color::Reset);
        }

        let subtitle = "◈◈  dig deep, unlock the doors  ◈◈";
        self.front.put_str(8, 8, subtitle, Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);

        let menu_base = 11;
        self.front.put_str(8, menu_base, "ENTER   Start Digging", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(8, menu_base + 1, "  Q     Quit", Color::White, Color::Reset);

        let depth_info = format!("      {} depths await", s.max_level);
        self.front.put_str(8, menu_base + 3, &depth_info, Color::DarkGrey, Color::Reset);

        let help = [
            "Controls",
            "  ←→↑↓ / WASD   Face & strike a tile",
            "  E             Toggle inventory",
            "  ESC / Q       Quit",
            "",
            "Break ore ◆ for minerals. Batter the red",
            "door open to descend; the cyan portal",
            "returns you to the previous depth.",
        ];
        for (i, line) in help.iter().enumerate() {
            let color = if i == 0 { Color::Rgb { r: 255, g: 200, b: 50 } } else { Color::White };
            self.front.put_str(8, menu_base + 5 + i, line, color, Color::Reset);
        }
    }

    fn compose_game_complete(&mut self, s: &GameSession) {
        let box_art = [
            "╔═══════════════════════════════════════╗",
            "║  ★ ALL DEPTHS CLEARED — WELL DUG! ★  ║",
            "╚═══════════════════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_str(4, 3 + i, l, Color::Rgb { r: 255, g: 220, b: 50 }, Color::Reset);
        }

        let total = format!("◈ Minerals collected: {}", s.player.total_collected());
        self.front.put_str(6, 7, &total, Color::White, Color::Reset);

        for (i, mineral) in Mineral::ALL.iter().enumerate() {
            let row = 9 + i;
            let line = format!("{:<9} {}", mineral.name(), s.player.count(*mineral));
            self.front.put_str(8, row, &line, mineral_color(*mineral), Color::Reset);
        }

        let exit_row = 9 + Mineral::ALL.len() + 1;
        self.front.put_str(6, exit_row, "▸ ESC / Q: Quit", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
    }
}

// ── Palette ──

fn mineral_color(mineral: Mineral) -> Color {
    match mineral {
        Mineral::Copper => Color::Rgb { r: 184, g: 115, b: 51 },
        Mineral::Iron => Color::Rgb { r: 128, g: 128, b: 128 },
        Mineral::Gold => Color::Rgb { r: 255, g: 215, b: 0 },
        Mineral::Emerald => Color::Rgb { r: 80, g: 200, b: 120 },
        Mineral::Sapphire => Color::Rgb { r: 15, g: 82, b: 186 },
        Mineral::Ruby => Color::Rgb { r: 224, g: 17, b: 95 },
        Mineral::Diamond => Color::Rgb { r: 185, g: 242, b: 255 },
        Mineral::Amethyst => Color::Rgb { r: 153, g: 102, b: 204 },
        Mineral::Topaz => Color::Rgb { r: 255, g: 200, b: 124 },
        // Brightened from true obsidian black to stay visible on the
        // dark base background
        Mineral::Obsidian => Color::Rgb { r: 95, g: 90, b: 110 },
    }
}

/// Ground brown, darker on deeper levels.
fn ground_color(level: u32) -> Color {
    let lightness = 70_i32.saturating_sub(5 * (level.saturating_sub(1)) as i32).max(25) as f32 / 100.0;
    // HSL(30°, 80%, lightness) → RGB
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * 0.8;
    let x = c * 0.5; // hue 30° → X = C * (1 - |(30/60 mod 2) - 1|)
    let m = lightness - c / 2.0;
    let (r, g, b) = (c + m, x + m, m);
    Color::Rgb { r: (r * 255.0) as u8, g: (g * 255.0) as u8, b: (b * 255.0) as u8 }
}

/// Right-hand column of a damaged tile: partial block by HP ratio,
/// green → yellow → red as it runs down.
fn hp_bar_cell(hp: u32, max_hp: u32, bg: Color) -> Cell {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let ratio = hp as f32 / max_hp.max(1) as f32;
    let idx = ((ratio * 8.0).ceil() as usize).clamp(1, 8) - 1;
    let fg = if ratio > 0.5 {
        Color::Rgb { r: 50, g: 205, b: 50 }
    } else if ratio > 0.25 {
        Color::Rgb { r: 230, g: 200, b: 50 }
    } else {
        Color::Rgb { r: 220, g: 60, b: 60 }
    };
    Cell::new(BLOCKS[idx], fg, bg)
}
