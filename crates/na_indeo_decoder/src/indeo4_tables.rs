/// Indeo 4 dequantisation base tables.
///
/// Nine 8x8 and five 4x4 matrices, each in an intra and an inter flavour.

pub static QUANT8X8_INTRA: [[u16; 64]; 9] = [
    [
          43,  342,  385,  470,  555,  555,  598,  726,  342,  342,  470,  513,  555,  598,  726,  769,
         385,  470,  555,  555,  598,  726,  726,  811,  470,  470,  555,  555,  598,  726,  769,  854,
         470,  555,  555,  598,  683,  726,  854, 1025,  555,  555,  598,  683,  726,  854, 1025, 1153,
         555,  555,  598,  726,  811,  982, 1195, 1451,  555,  598,  726,  811,  982, 1195, 1451, 1793,
    ],
    [
          86, 1195, 2390, 2390, 4865, 4865, 4865, 4865, 1195, 1195, 2390, 2390, 4865, 4865, 4865, 4865,
        2390, 2390, 4865, 4865, 6827, 6827, 6827, 6827, 2390, 2390, 4865, 4865, 6827, 6827, 6827, 6827,
        4865, 4865, 6827, 6827, 6827, 6827, 6827, 6827, 4865, 4865, 6827, 6827, 6827, 6827, 6827, 6827,
        4865, 4865, 6827, 6827, 6827, 6827, 6827, 6827, 4865, 4865, 6827, 6827, 6827, 6827, 6827, 6827,
    ],
    [
         235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,  235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,
         235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,  235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,
         235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,  235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,
         235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,  235, 1067, 1195, 1323, 1451, 1579, 1707, 1835,
    ],
    [
        1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414, 1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414,
        1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414, 1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414,
        1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414, 1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414,
        1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414, 1707, 1707, 3414, 3414, 3414, 3414, 3414, 3414,
    ],
    [
         897,  897,  897,  897,  897,  897,  897,  897, 1067, 1067, 1067, 1067, 1067, 1067, 1067, 1067,
        1238, 1238, 1238, 1238, 1238, 1238, 1238, 1238, 1409, 1409, 1409, 1409, 1409, 1409, 1409, 1409,
        1579, 1579, 1579, 1579, 1579, 1579, 1579, 1579, 1750, 1750, 1750, 1750, 1750, 1750, 1750, 1750,
        1921, 1921, 1921, 1921, 1921, 1921, 1921, 1921, 2091, 2091, 2091, 2091, 2091, 2091, 2091, 2091,
    ],
    [
        1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707,
        3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414,
        3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414,
        3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414,
    ],
    [
        2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390,
        2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390,
        2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390,
        2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390, 2390,
    ],
    [
          22,  171,  214,  257,  257,  299,  299,  342,  171,  171,  257,  257,  299,  299,  342,  385,
         214,  257,  257,  299,  299,  342,  342,  385,  257,  257,  257,  299,  299,  342,  385,  427,
         257,  257,  299,  299,  342,  385,  427,  513,  257,  299,  299,  342,  385,  427,  513,  598,
         299,  299,  299,  385,  385,  470,  598,  726,  299,  299,  385,  385,  470,  598,  726,  897,
    ],
    [
          86,  598, 1195, 1195, 2390, 2390, 2390, 2390,  598,  598, 1195, 1195, 2390, 2390, 2390, 2390,
        1195, 1195, 2390, 2390, 3414, 3414, 3414, 3414, 1195, 1195, 2390, 2390, 3414, 3414, 3414, 3414,
        2390, 2390, 3414, 3414, 3414, 3414, 3414, 3414, 2390, 2390, 3414, 3414, 3414, 3414, 3414, 3414,
        2390, 2390, 3414, 3414, 3414, 3414, 3414, 3414, 2390, 2390, 3414, 3414, 3414, 3414, 3414, 3414,
    ],
];

pub static QUANT8X8_INTER: [[u16; 64]; 9] = [
    [
         427,  427,  470,  427,  427,  427,  470,  470,  427,  427,  470,  427,  427,  427,  470,  470,
         470,  470,  470,  470,  470,  470,  470,  470,  427,  427,  470,  470,  427,  427,  470,  470,
         427,  427,  470,  427,  427,  427,  470,  470,  427,  427,  470,  427,  427,  427,  470,  470,
         470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,  470,
    ],
    [
        1707, 1707, 2433, 2433, 3414, 3414, 3414, 3414, 1707, 1707, 2433, 2433, 3414, 3414, 3414, 3414,
        2433, 2433, 3414, 3414, 4822, 4822, 4822, 4822, 2433, 2433, 3414, 3414, 4822, 4822, 4822, 4822,
        3414, 3414, 4822, 4822, 3414, 3414, 3414, 3414, 3414, 3414, 4822, 4822, 3414, 3414, 3414, 3414,
        3414, 3414, 4822, 4822, 3414, 3414, 3414, 3414, 3414, 3414, 4822, 4822, 3414, 3414, 3414, 3414,
    ],
    [
        1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281, 1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281,
        1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281, 1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281,
        1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281, 1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281,
        1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281, 1195, 1195, 1281, 1238, 1195, 1195, 1281, 1281,
    ],
    [
        2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433, 2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433,
        2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433, 2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433,
        2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433, 2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433,
        2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433, 2433, 2433, 3414, 3414, 2433, 2433, 2433, 2433,
    ],
    [
        1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195,
        1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1238, 1238, 1238, 1238, 1238, 1238, 1238, 1238,
        1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195, 1195,
        1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281, 1281,
    ],
    [
        2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433,
        3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414, 3414,
        2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433,
        2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433, 2433,
    ],
    [
        1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707,
        1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707,
        1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707,
        1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707, 1707,
    ],
    [
          86,  171,  171,  214,  214,  214,  214,  257,  171,  171,  214,  214,  214,  214,  257,  257,
         171,  214,  214,  214,  214,  257,  257,  257,  214,  214,  214,  214,  257,  257,  257,  299,
         214,  214,  214,  257,  257,  257,  299,  299,  214,  214,  257,  257,  257,  299,  299,  299,
         214,  257,  257,  257,  299,  299,  299,  342,  257,  257,  257,  299,  299,  299,  342,  342,
    ],
    [
         854,  854, 1195, 1195, 1707, 1707, 1707, 1707,  854,  854, 1195, 1195, 1707, 1707, 1707, 1707,
        1195, 1195, 1707, 1707, 2390, 2390, 2390, 2390, 1195, 1195, 1707, 1707, 2390, 2390, 2390, 2390,
        1707, 1707, 2390, 2390, 1707, 1707, 1707, 1707, 1707, 1707, 2390, 2390, 1707, 1707, 1707, 1707,
        1707, 1707, 2390, 2390, 1707, 1707, 1707, 1707, 1707, 1707, 2390, 2390, 1707, 1707, 1707, 1707,
    ],
];

pub static QUANT4X4_INTRA: [[u16; 16]; 5] = [
    [
          22,  214,  257,  299,  214,  257,  299,  342,  257,  299,  342,  427,  299,  342,  427,  513,
    ],
    [
         129, 1025, 1451, 1451, 1025, 1025, 1451, 1451, 1451, 1451, 2049, 2049, 1451, 1451, 2049, 2049,
    ],
    [
          43,  171,  171,  171,   43,  171,  171,  171,   43,  171,  171,  171,   43,  171,  171,  171,
    ],
    [
          43,   43,   43,   43,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,
    ],
    [
          43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,
    ],
];

pub static QUANT4X4_INTER: [[u16; 16]; 5] = [
    [
         107,  214,  257,  299,  214,  257,  299,  299,  257,  299,  299,  342,  299,  299,  342,  342,
    ],
    [
         513, 1025, 1238, 1238, 1025, 1025, 1238, 1238, 1238, 1238, 1451, 1451, 1238, 1238, 1451, 1451,
    ],
    [
          43,  171,  171,  171,   43,  171,  171,  171,   43,  171,  171,  171,   43,  171,  171,  171,
    ],
    [
          43,   43,   43,   43,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,  171,
    ],
    [
          43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,   43,
    ],
];

/// Band quant-matrix field to table index. Entries 15.. select 4x4 tables.
pub static QUANT_INDEX_MAP: [usize; 22] = [
    0, 1, 0, 2, 1, 3, 0, 4, 1, 5, 0, 1, 6, 7, 8, 0, 1, 2, 2, 3, 3, 4,
];
