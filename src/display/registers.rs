//! RA8875 register map
//!
//! Only the registers the driver touches. Names follow the datasheet.

/// SPI cycle selectors (first byte of every exchange)
pub mod cycle {
    pub const DATA_WRITE: u8 = 0x00;
    pub const DATA_READ: u8 = 0x40;
    pub const CMD_WRITE: u8 = 0x80;
    pub const STATUS_READ: u8 = 0xC0;
}

/// Identification register, reads 0x75 once the controller is up
pub const ID: u8 = 0x00;
pub const ID_VALUE: u8 = 0x75;

// System and power
pub const PWRR: u8 = 0x01;
pub const PWRR_DISPON: u8 = 0x80;
pub const PWRR_NORMAL: u8 = 0x00;
pub const MRWC: u8 = 0x02; // Memory read/write command
pub const PCSR: u8 = 0x04; // Pixel clock setting
pub const PCSR_PDATL: u8 = 0x80;
pub const PCSR_2CLK: u8 = 0x01;
pub const SYSR: u8 = 0x10;
pub const SYSR_8BPP: u8 = 0x00;

// Horizontal timing
pub const HDWR: u8 = 0x14;
pub const HNDFTR: u8 = 0x15;
pub const HNDFTR_DE_HIGH: u8 = 0x00;
pub const HNDR: u8 = 0x16;
pub const HSTR: u8 = 0x17;
pub const HPWR: u8 = 0x18;
pub const HPWR_LOW: u8 = 0x00;

// Vertical timing
pub const VDHR0: u8 = 0x19;
pub const VDHR1: u8 = 0x1A;
pub const VNDR0: u8 = 0x1B;
pub const VNDR1: u8 = 0x1C;
pub const VSTR0: u8 = 0x1D;
pub const VSTR1: u8 = 0x1E;
pub const VPWR: u8 = 0x1F;
pub const VPWR_LOW: u8 = 0x00;

// Display configuration
pub const DPCR: u8 = 0x20;
pub const DPCR_TWO_LAYERS: u8 = 0x80;
pub const FNCR0: u8 = 0x21; // Font control 0 (CGROM select)
pub const FNCR1: u8 = 0x22; // Font control 1 (size, transparency)
/// 3×3 enlargement, transparent background
pub const FNCR1_TRIPLE_TRANSPARENT: u8 = 0x0A | 0x40;

// Text cursor
pub const F_CURXL: u8 = 0x2A;
pub const F_CURXH: u8 = 0x2B;
pub const F_CURYL: u8 = 0x2C;
pub const F_CURYH: u8 = 0x2D;

// Active window
pub const HSAW0: u8 = 0x30;
pub const HSAW1: u8 = 0x31;
pub const VSAW0: u8 = 0x32;
pub const VSAW1: u8 = 0x33;
pub const HEAW0: u8 = 0x34;
pub const HEAW1: u8 = 0x35;
pub const VEAW0: u8 = 0x36;
pub const VEAW1: u8 = 0x37;

// Memory write control
pub const MWCR0: u8 = 0x40;
pub const MWCR0_GRAPHIC: u8 = 0x00;
pub const MWCR0_TEXT: u8 = 0x80;
pub const MWCR1: u8 = 0x41;

// Graphic write / read cursors
pub const CURH0: u8 = 0x46;
pub const CURH1: u8 = 0x47;
pub const CURV0: u8 = 0x48;
pub const CURV1: u8 = 0x49;
pub const RCURH0: u8 = 0x4A;
pub const RCURH1: u8 = 0x4B;
pub const RCURV0: u8 = 0x4C;
pub const RCURV1: u8 = 0x4D;

// Block transfer engine
pub const BECR0: u8 = 0x50;
pub const BECR0_START: u8 = 0x80;
pub const BECR1: u8 = 0x51;
pub const LTPR0: u8 = 0x52;
pub const HSBE0: u8 = 0x54; // Source X low; X high, Y low, Y high | layer follow
pub const HDBE0: u8 = 0x58; // Destination X low; same layout as source
pub const BEWR0: u8 = 0x5C; // Width low, width high, height low, height high

// Foreground colour, 3:3:2 split in 8bpp mode
pub const FGCR0: u8 = 0x63;
pub const FGCR1: u8 = 0x64;
pub const FGCR2: u8 = 0x65;

// Backlight PWM and PLL
pub const PLLC1: u8 = 0x88;
pub const PLLC1_PLLDIV1: u8 = 0x00;
pub const PLLC2: u8 = 0x89;
pub const PLLC2_DIV1: u8 = 0x00;
pub const P1CR: u8 = 0x8A;
pub const P1CR_ENABLE: u8 = 0x80;
pub const P1DCR: u8 = 0x8B;
pub const PWM_CLK_DIV1024: u8 = 0x0A;

// Memory clear
pub const MCLR: u8 = 0x8E;
pub const MCLR_START: u8 = 0x80;
pub const MCLR_FULL: u8 = 0x00;

// Geometric drawing
pub const DCR: u8 = 0x90;
pub const DCR_RECT_OUTLINE: u8 = 0x90;
pub const DCR_RECT_FILLED: u8 = 0xB0;
pub const DLHSR0: u8 = 0x91; // Start X low, then start X high, start Y, end X, end Y
pub const DLVSR0: u8 = 0x93;
pub const DLHER0: u8 = 0x95;
pub const DLVER0: u8 = 0x97;

// Extra general purpose IO (TFT enable on most panels)
pub const GPIOX: u8 = 0xC7;

// Interrupts
pub const INTC1: u8 = 0xF0;
pub const INTC2: u8 = 0xF1;
