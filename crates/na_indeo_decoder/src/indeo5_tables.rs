/// Indeo 5 dequantisation base and quantiser scale tables.

pub static QUANT8X8_INTRA: [[u16; 64]; 5] = [
    [
          26,   46,   54,   66,   70,   74,   78,   90,   46,   50,   62,   66,   70,   78,   86,  106,
          54,   62,   62,   68,   74,   84,  102,  114,   66,   66,   68,   74,   82,   98,  108,  122,
          70,   70,   74,   82,   94,  102,  114,  142,   74,   78,   84,   98,  102,  110,  134,  166,
          78,   86,  102,  108,  114,  134,  154,  202,   90,  106,  114,  122,  142,  166,  202,  254,
    ],
    [
          38,   58,   62,   70,   74,   78,   82,   90,   58,   62,   66,   70,   74,   78,   86,   94,
          62,   66,   70,   72,   76,   82,   90,   98,   70,   70,   72,   74,   78,   86,   94,  102,
          74,   74,   76,   78,   82,   90,   98,  106,   78,   78,   82,   86,   90,   94,  102,  110,
          82,   86,   90,   94,   98,  102,  106,  114,   90,   94,   98,  102,  106,  110,  114,  118,
    ],
    [
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
    ],
    [
          78,   78,   78,   78,   78,   78,   78,   78,  170,  170,  170,  170,  170,  170,  170,  170,
         242,  242,  242,  242,  242,  242,  242,  242,  212,  212,  212,  212,  212,  212,  212,  212,
         222,  222,  222,  222,  222,  222,  222,  222,  194,  194,  194,  194,  194,  194,  194,  194,
         214,  214,  214,  214,  214,  214,  214,  214,  194,  194,  194,  194,  194,  194,  194,  194,
    ],
    [
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
    ],
];

pub static QUANT8X8_INTER: [[u16; 64]; 5] = [
    [
          38,   58,   62,   70,   74,   78,   82,   90,   58,   62,   66,   70,   74,   78,   86,   94,
          62,   66,   70,   72,   76,   82,   90,   98,   70,   70,   72,   74,   78,   86,   94,  102,
          74,   74,   76,   78,   82,   90,   98,  106,   78,   78,   82,   86,   90,   94,  102,  110,
          82,   86,   90,   94,   98,  102,  106,  114,   90,   94,   98,  102,  106,  110,  114,  118,
    ],
    [
          38,   58,   62,   70,   74,   78,   82,   90,   58,   62,   66,   70,   74,   78,   86,   94,
          62,   66,   70,   72,   76,   82,   90,   98,   70,   70,   72,   74,   78,   86,   94,  102,
          74,   74,   76,   78,   82,   90,   98,  106,   78,   78,   82,   86,   90,   94,  102,  110,
          82,   86,   90,   94,   98,  102,  106,  114,   90,   94,   98,  102,  106,  110,  114,  118,
    ],
    [
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
          78,  170,  242,  212,  222,  194,  214,  194,   78,  170,  242,  212,  222,  194,  214,  194,
    ],
    [
          78,   78,   78,   78,   78,   78,   78,   78,  170,  170,  170,  170,  170,  170,  170,  170,
         242,  242,  242,  242,  242,  242,  242,  242,  212,  212,  212,  212,  212,  212,  212,  212,
         222,  222,  222,  222,  222,  222,  222,  222,  194,  194,  194,  194,  194,  194,  194,  194,
         214,  214,  214,  214,  214,  214,  214,  214,  194,  194,  194,  194,  194,  194,  194,  194,
    ],
    [
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
          94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,   94,
    ],
];

pub static QUANT4X4_INTRA: [u16; 16] = [
      30,   62,   74,   82,   62,   74,   82,   94,   74,   82,   94,  122,   82,   94,  122,  146,
];

pub static QUANT4X4_INTER: [u16; 16] = [
      30,   62,   74,   82,   62,   74,   82,   86,   74,   82,   86,   94,   82,   86,   94,  102,
];

pub static QSCALE8_INTRA: [[u8; 24]; 5] = [
    [
         11,  14,  16,  18,  20,  22,  23,  24,  26,  28,  30,  32,
         34,  36,  39,  40,  42,  45,  47,  49,  52,  55,  57,  60,
    ],
    [
          1,  16,  18,  20,  22,  24,  27,  30,  34,  37,  40,  44,
         48,  52,  56,  61,  66,  71,  76,  82,  88,  94, 101, 108,
    ],
    [
         19,  34,  39,  42,  45,  51,  54,  60,  65,  69,  73,  78,
         83,  88,  93,  99, 105, 111, 117, 124, 130, 136, 142, 149,
    ],
    [
         19,  31,  33,  36,  39,  41,  45,  47,  52,  55,  58,  61,
         64,  68,  72,  76,  79,  82,  86,  90,  94,  98, 102, 107,
    ],
    [
         49,  66,  71,  71,  77,  82,  88,  88,  93,  99, 103, 107,
        111, 115, 120, 124, 128, 132, 137, 142, 147, 152, 157, 164,
    ],
];

pub static QSCALE8_INTER: [[u8; 24]; 5] = [
    [
         11,  17,  19,  20,  21,  22,  24,  26,  27,  29,  32,  34,
         35,  37,  40,  42,  46,  50,  53,  57,  61,  65,  68,  74,
    ],
    [
          7,  20,  22,  24,  27,  30,  34,  37,  41,  45,  49,  53,
         58,  63,  68,  74,  80,  86,  92,  99, 106, 113, 120, 126,
    ],
    [
         21,  37,  40,  45,  48,  52,  58,  61,  66,  72,  76,  81,
         86,  91,  96, 101, 107, 112, 118, 124, 130, 136, 143, 151,
    ],
    [
         19,  31,  32,  34,  37,  40,  43,  45,  48,  51,  54,  57,
         60,  63,  66,  69,  72,  75,  78,  82,  86,  90,  94,  98,
    ],
    [
         60,  82,  88,  93,  99, 104, 104, 109, 115, 120, 124, 128,
        132, 137, 142, 147, 152, 157, 163, 169, 173, 177, 181, 186,
    ],
];

pub static QSCALE4_INTRA: [u8; 24] = [
      1,  11,  11,  13,  13,  13,  14,  15,  16,  17,  19,  20,
     21,  22,  23,  24,  25,  26,  27,  28,  29,  30,  31,  32,
];

pub static QSCALE4_INTER: [u8; 24] = [
     11,  13,  13,  14,  17,  17,  18,  19,  20,  21,  22,  23,
     24,  25,  26,  27,  28,  29,  30,  31,  32,  33,  34,  35,
];
