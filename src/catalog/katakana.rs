use crate::catalog::{CharacterEntry, Row};

const fn e(glyph: &'static str, romaji: &'static str) -> CharacterEntry {
    CharacterEntry::new(glyph, romaji)
}

/// Basic katakana in gojuon order, followed by the dakuten and handakuten rows.
pub static ROWS: &[Row] = &[
    Row {
        id: "vowels",
        label: "Vowels (ア行)",
        members: &[
            e("ア", "a"),
            e("イ", "i"),
            e("ウ", "u"),
            e("エ", "e"),
            e("オ", "o"),
        ],
    },
    Row {
        id: "ka",
        label: "Ka Row (カ行)",
        members: &[
            e("カ", "ka"),
            e("キ", "ki"),
            e("ク", "ku"),
            e("ケ", "ke"),
            e("コ", "ko"),
        ],
    },
    Row {
        id: "sa",
        label: "Sa Row (サ行)",
        members: &[
            e("サ", "sa"),
            e("シ", "shi"),
            e("ス", "su"),
            e("セ", "se"),
            e("ソ", "so"),
        ],
    },
    Row {
        id: "ta",
        label: "Ta Row (タ行)",
        members: &[
            e("タ", "ta"),
            e("チ", "chi"),
            e("ツ", "tsu"),
            e("テ", "te"),
            e("ト", "to"),
        ],
    },
    Row {
        id: "na",
        label: "Na Row (ナ行)",
        members: &[
            e("ナ", "na"),
            e("ニ", "ni"),
            e("ヌ", "nu"),
            e("ネ", "ne"),
            e("ノ", "no"),
        ],
    },
    Row {
        id: "ha",
        label: "Ha Row (ハ行)",
        members: &[
            e("ハ", "ha"),
            e("ヒ", "hi"),
            e("フ", "fu"),
            e("ヘ", "he"),
            e("ホ", "ho"),
        ],
    },
    Row {
        id: "ma",
        label: "Ma Row (マ行)",
        members: &[
            e("マ", "ma"),
            e("ミ", "mi"),
            e("ム", "mu"),
            e("メ", "me"),
            e("モ", "mo"),
        ],
    },
    Row {
        id: "ya",
        label: "Ya Row (ヤ行)",
        members: &[
            e("ヤ", "ya"),
            e("ユ", "yu"),
            e("ヨ", "yo"),
        ],
    },
    Row {
        id: "ra",
        label: "Ra Row (ラ行)",
        members: &[
            e("ラ", "ra"),
            e("リ", "ri"),
            e("ル", "ru"),
            e("レ", "re"),
            e("ロ", "ro"),
        ],
    },
    Row {
        id: "wa",
        label: "Wa Row (ワ行)",
        members: &[
            e("ワ", "wa"),
            e("ヲ", "wo"),
            e("ン", "n"),
        ],
    },
    Row {
        id: "ga",
        label: "Ga Row (ガ行)",
        members: &[
            e("ガ", "ga"),
            e("ギ", "gi"),
            e("グ", "gu"),
            e("ゲ", "ge"),
            e("ゴ", "go"),
        ],
    },
    Row {
        id: "za",
        label: "Za Row (ザ行)",
        members: &[
            e("ザ", "za"),
            e("ジ", "ji"),
            e("ズ", "zu"),
            e("ゼ", "ze"),
            e("ゾ", "zo"),
        ],
    },
    Row {
        id: "da",
        label: "Da Row (ダ行)",
        members: &[
            e("ダ", "da"),
            e("ヂ", "di"),
            e("ヅ", "du"),
            e("デ", "de"),
            e("ド", "do"),
        ],
    },
    Row {
        id: "ba",
        label: "Ba Row (バ行)",
        members: &[
            e("バ", "ba"),
            e("ビ", "bi"),
            e("ブ", "bu"),
            e("ベ", "be"),
            e("ボ", "bo"),
        ],
    },
    Row {
        id: "pa",
        label: "Pa Row (パ行)",
        members: &[
            e("パ", "pa"),
            e("ピ", "pi"),
            e("プ", "pu"),
            e("ペ", "pe"),
            e("ポ", "po"),
        ],
    },
];
