pub const PORT: u16 = 1864;
