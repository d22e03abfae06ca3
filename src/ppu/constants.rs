// src/ppu/constants.rs

#![allow(dead_code)] // Allow unused constants for definition completeness

// --- Screen Dimensions ---
pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

// --- Timing (in machine cycles) ---
pub const DOTS_PER_LINE: u16 = 450;
pub const LINES_PER_FRAME: u8 = 154; // 144 visible + 10 VBlank
pub const DOTS_PER_FRAME: u32 = DOTS_PER_LINE as u32 * LINES_PER_FRAME as u32;

/// Dot at which the OAM-scan mode for the next line begins; the sprite and
/// window layers for the line are painted en bloc here.
pub const OAM_SCAN_ENTRY_DOT: u16 = 360;

/// First HBLANK dot of a visible line.
pub const HBLANK_ENTRY_DOT: u16 = 160;

// --- PPU Modes (values for STAT register bits 0-1) ---
pub const HBLANK_MODE: u8 = 0;
pub const VBLANK_MODE: u8 = 1;
pub const OAM_SCAN_MODE: u8 = 2;
pub const DRAW_MODE: u8 = 3;

// --- LCDC Flags (bit positions in LCDC register 0xFF40) ---
pub const LCDC_BG_ENABLE: u8 = 0; // BG layer enable
pub const LCDC_OBJ_ENABLE: u8 = 1; // Sprite layer enable
pub const LCDC_OBJ_SIZE: u8 = 2; // Sprite size (0=8x8, 1=8x16)
pub const LCDC_BG_MAP_AREA: u8 = 3; // BG tile map area (0=9800, 1=9C00)
pub const LCDC_TILE_DATA_AREA: u8 = 4; // Tile data area (0=8800 signed, 1=8000)
pub const LCDC_WINDOW_ENABLE: u8 = 5; // Window layer enable
pub const LCDC_WINDOW_MAP_AREA: u8 = 6; // Window tile map area (0=9800, 1=9C00)
pub const LCDC_LCD_ENABLE: u8 = 7; // LCD master enable

// --- STAT Flags (bit positions in STAT register 0xFF41) ---
// Bits 0-1: mode flag (read only)
pub const STAT_LYC_FLAG: u8 = 2; // LY == LYC (read only)
pub const STAT_HBLANK_IE: u8 = 3; // Mode 0 interrupt enable
pub const STAT_VBLANK_IE: u8 = 4; // Mode 1 interrupt enable
pub const STAT_OAM_IE: u8 = 5; // Mode 2 interrupt enable
pub const STAT_LYC_IE: u8 = 6; // LY == LYC interrupt enable

// --- OAM Attribute Flags (bit positions in OAM byte 3) ---
pub const OAM_PALETTE: u8 = 4; // Palette select (0=OBP0, 1=OBP1)
pub const OAM_X_FLIP: u8 = 5; // Horizontal flip
pub const OAM_Y_FLIP: u8 = 6; // Vertical flip
pub const OAM_BG_PRIORITY: u8 = 7; // Behind BG colors 1-3 when set

/// Hardware limit on sprites painted per scanline.
pub const SPRITES_PER_LINE: usize = 10;
