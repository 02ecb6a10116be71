//! Orthographic English plugin.
//!
//! Ships a built-in segment inventory (letters, onset clusters, vowel
//! digraphs, coda clusters) and an embedded lexicon of common spellings.
//! Transition statistics are not hand-written: the builder segments every
//! lexicon word with the inventory and counts which segments occur and
//! which pairs are adjacent, the same way an on-disk bundle would be
//! compiled from a corpus.
//!
//! Public API:
//! - `ORTHOGRAPHIC_ENGLISH` — the plugin identifier
//! - `builtin_model()` — build the embedded model
//! - `register()` — install it into the process registry (idempotent)

use std::sync::Arc;

use pseudolex_core::registry;
use pseudolex_core::segmenter::segment;
use pseudolex_core::{LanguageModel, Lexicon, SegmentStats};

/// Identifier of this language plugin.
pub const ORTHOGRAPHIC_ENGLISH: &str = "orthographic_english";

/// Plugins this crate can provide out of the box.
pub const SUPPORTED_LANGUAGE_PLUGINS: &[&str] = &[ORTHOGRAPHIC_ENGLISH];

/// Single letters. Every letter is its own fallback segment, which keeps
/// segmentation total over plain a-z spellings.
const LETTERS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
];

/// Common word-initial consonant clusters.
const ONSETS: &[&str] = &[
    "bl", "br", "ch", "cl", "cr", "dr", "dw", "fl", "fr", "gl", "gr", "kn", "ph", "pl", "pr",
    "qu", "sc", "sh", "sk", "sl", "sm", "sn", "sp", "st", "sw", "th", "tr", "tw", "wh", "wr",
    "scr", "shr", "spl", "spr", "squ", "str", "thr",
];

/// Vowel digraphs (single vowels are covered by `LETTERS`).
const NUCLEI: &[&str] = &[
    "ai", "au", "aw", "ay", "ea", "ee", "ei", "ew", "ey", "ie", "oa", "oi", "oo", "ou", "ow",
    "oy", "ue", "ui",
];

/// Common syllable-final consonant clusters.
const CODAS: &[&str] = &[
    "bs", "ck", "ct", "ft", "ght", "ld", "lf", "lk", "ll", "lm", "lp", "lt", "mb", "mp", "nd",
    "ng", "nk", "nt", "pt", "rb", "rd", "rk", "rl", "rm", "rn", "rp", "rt", "ss", "st", "tch",
    "ts",
];

/// Embedded lexicon: common English spellings, lowercase a-z only.
const WORDS: &[&str] = &[
    "about", "after", "again", "alarm", "apple", "april", "arm", "ask", "aunt", "autumn",
    "awful", "back", "badge", "ball", "band", "bank", "barn", "bat", "bath", "beach", "bean",
    "bear", "beast", "bed", "bee", "beef", "been", "beer", "bell", "belt", "bench", "bend",
    "best", "bet", "big", "bin", "bird", "bit", "bite", "black", "blade", "blank", "blast",
    "blend", "bless", "blind", "block", "bloom", "blot", "blunt", "blush", "boast", "boat",
    "bold", "bolt", "bond", "bone", "book", "boot", "born", "boss", "both", "bout", "bowl",
    "box", "boy", "brain", "bran", "brand", "brass", "brave", "bread", "break", "brick",
    "bride", "brief", "bright", "brim", "bring", "brink", "brisk", "broad", "broom", "broth",
    "brown", "brush", "bulb", "bulk", "bull", "bump", "bunch", "bunk", "burn", "burst", "bus",
    "bust", "but", "cab", "cake", "calm", "camp", "can", "cap", "car", "card", "cart", "cast",
    "cat", "catch", "cave", "cell", "cent", "chain", "chair", "chalk", "champ", "chant",
    "charm", "chart", "chat", "cheap", "check", "cheek", "cheer", "chess", "chest", "chew",
    "chick", "chief", "chill", "chimp", "chin", "chip", "chop", "chore", "chunk", "churn",
    "clamp", "clan", "clap", "clash", "clasp", "class", "claw", "clay", "clean", "clear",
    "clerk", "click", "cliff", "climb", "cling", "clip", "cloak", "clock", "cloth", "cloud",
    "clown", "club", "clue", "clump", "clutch", "coach", "coal", "coast", "coat", "cod",
    "coil", "coin", "cold", "colt", "comb", "cook", "cool", "cord", "cork", "corn", "cost",
    "cot", "couch", "count", "court", "cow", "crab", "craft", "cramp", "crane", "crash",
    "crawl", "cream", "creek", "creep", "crest", "crew", "crib", "crisp", "croak", "crop",
    "cross", "crowd", "crown", "crumb", "crumpet", "crunch", "crush", "crust", "cub", "cup",
    "curb", "curl", "cut", "dam", "damp", "dark", "dart", "dash", "dawn", "day", "deal",
    "dean", "deck", "deed", "deep", "deer", "den", "dent", "desk", "dig", "dim", "dip",
    "dirt", "dish", "dock", "dog", "doll", "dot", "down", "drab", "draft", "drag", "drain",
    "draw", "dream", "dress", "drew", "drift", "drill", "drink", "drip", "drop", "drum",
    "dry", "duck", "dull", "dump", "dusk", "dust", "each", "ear", "earn", "east", "eat",
    "edge", "eel", "egg", "elm", "end", "fact", "fair", "fall", "fan", "far", "farm", "fast",
    "fat", "fed", "fee", "feed", "feel", "feet", "fell", "felt", "fern", "fetch", "few",
    "field", "fig", "fill", "film", "fin", "find", "firm", "fish", "fist", "fit", "flag",
    "flame", "flap", "flash", "flask", "flat", "fleet", "flesh", "flick", "flight", "fling",
    "flint", "flip", "float", "flock", "flood", "floor", "flour", "flow", "fluff", "flush",
    "foam", "fog", "fold", "folk", "fond", "food", "fool", "foot", "fork", "form", "fort",
    "found", "fowl", "fox", "frame", "free", "fresh", "frill", "fringe", "frog", "front",
    "frost", "froth", "frown", "fruit", "fun", "fund", "fur", "gain", "game", "gang", "gap",
    "gasp", "gate", "gaunt", "gear", "gem", "get", "gift", "gig", "gill", "glad", "gland",
    "glass", "gleam", "glee", "glide", "glimpse", "glint", "gloom", "glow", "glue", "gnat",
    "goal", "goat", "gold", "golf", "good", "goose", "gown", "grab", "grain", "grand",
    "grant", "grape", "graph", "grasp", "grass", "great", "greed", "green", "greet", "grid",
    "grief", "grill", "grim", "grin", "grind", "grip", "grit", "groan", "groom", "ground",
    "group", "growl", "grub", "grunt", "gulf", "gull", "gulp", "gum", "gust", "gut", "hail",
    "hair", "half", "hall", "halt", "ham", "hand", "hang", "hard", "harm", "harp", "hat",
    "hatch", "haul", "hawk", "hay", "heap", "heart", "heat", "heel", "held", "helm", "help",
    "hemp", "hen", "herb", "herd", "high", "hill", "hilt", "hint", "hip", "hit", "hold",
    "home", "hood", "hoof", "hook", "hoop", "hop", "horn", "host", "hot", "hound", "hour",
    "house", "howl", "hub", "hug", "hull", "hum", "hump", "hunt", "hurl", "hurt", "hut",
    "ice", "inch", "ink", "inn", "iron", "jab", "jam", "jar", "jaw", "jay", "jet", "jig",
    "job", "jog", "join", "joint", "jolt", "joy", "jug", "jump", "junk", "just", "keel",
    "keen", "keep", "kelp", "kept", "key", "kick", "kid", "kill", "kilt", "kin", "kind",
    "king", "kit", "knee", "kneel", "knew", "knit", "knob", "knock", "knot", "know", "lab",
    "lack", "lad", "lake", "lamb", "lamp", "land", "lane", "lap", "lard", "lark", "lash",
    "last", "latch", "lawn", "lead", "leaf", "leak", "lean", "leap", "learn", "leash",
    "least", "led", "leek", "left", "leg", "lend", "lens", "lent", "let", "lick", "lid",
    "lift", "light", "limb", "limp", "line", "link", "lint", "lip", "list", "lit", "load",
    "loaf", "loan", "lock", "loft", "log", "long", "look", "loom", "loop", "lord", "loss",
    "lost", "lot", "loud", "lump", "lunch", "lung", "lurk", "mad", "maid", "mail", "main",
    "malt", "man", "map", "march", "mark", "marsh", "mask", "mast", "mat", "match", "meal",
    "mean", "meat", "meek", "meet", "melt", "mend", "mesh", "mess", "met", "mild", "milk",
    "mill", "mind", "mint", "mist", "moan", "mob", "mock", "mold", "monk", "month",
    "mood", "moon", "moss", "most", "moth", "mound", "mount", "mourn", "mouth", "mud",
    "mug", "mule", "munch", "mush", "must", "nail", "nap", "neat", "neck", "need", "nest",
    "net", "new", "night", "nod", "noon", "north", "nose", "not", "note", "noun", "numb",
    "nun", "nurse", "nut", "oak", "oat", "odd", "off", "oil", "old", "out", "owl", "own",
    "pack", "pact", "pad", "page", "pail", "pain", "paint", "pair", "palm", "pan", "pant",
    "park", "part", "past", "pat", "patch", "path", "paw", "pay", "pea", "peach", "peak",
    "pearl", "peck", "peel", "peer", "pen", "pet", "pick", "pig", "pile", "pill", "pin",
    "pinch", "pine", "pink", "pint", "pit", "pitch", "plan", "plane", "plank", "plant",
    "plate", "play", "plea", "plead", "plot", "plow", "pluck", "plug", "plum", "plump",
    "plus", "plush", "pod", "point", "pole", "pond", "pool", "pop", "porch", "pork", "port",
    "post", "pot", "pouch", "pound", "pour", "press", "prey", "price", "pride", "prim",
    "print", "prompt", "prong", "proof", "prop", "proud", "prowl", "prune", "pub", "puff",
    "pull", "pulp", "pump", "punch", "punt", "pup", "purse", "push", "quack", "quaint",
    "quart", "queen", "quest", "quick", "quilt", "quit", "rack", "raft", "rag", "raid",
    "rail", "rain", "ramp", "ran", "ranch", "rank", "rant", "rap", "rash", "rat", "raw",
    "ray", "reach", "read", "real", "reap", "red", "reed", "reef", "reel", "rent", "rest",
    "rib", "rice", "rich", "rid", "ride", "rift", "rig", "right", "rim", "ring", "rink",
    "rip", "ripe", "rise", "risk", "road", "roam", "roar", "roast", "rob", "rock", "rod",
    "roll", "roof", "room", "root", "rope", "rose", "rot", "round", "rub", "rug", "run",
    "rung", "runt", "rush", "rust", "sack", "sad", "sail", "salt", "sand", "sang", "sank",
    "sap", "sat", "saw", "say", "scab", "scale", "scalp", "scamp", "scan", "scar", "scarf",
    "scene", "scent", "school", "scoop", "scoot", "scope", "scorn", "scout", "scowl",
    "scrap", "scratch", "scream", "screen", "screw", "scrub", "sea", "seal", "seam", "seat",
    "sect", "see", "seed", "seek", "seem", "seen", "self", "sell", "send", "sent", "set",
    "shack", "shade", "shaft", "shall", "sham", "shape", "share", "shark", "sharp", "shawl",
    "shed", "sheep", "sheet", "shelf", "shell", "shift", "shin", "shine", "ship", "shirt",
    "shock", "shoe", "shook", "shoot", "shop", "shore", "shorn", "short", "shot", "shout",
    "show", "shrank", "shred", "shrewd", "shrill", "shrimp", "shrine", "shrink", "shrub",
    "shrug", "shut", "sick", "side", "sift", "sigh", "sight", "sign", "silk", "sill",
    "silt", "sin", "sing", "sink", "sip", "sit", "site", "six", "skate", "sketch", "skid",
    "skill", "skim", "skin", "skip", "skirt", "skull", "skunk", "sky", "slab", "slack",
    "slam", "slant", "slap", "slash", "slat", "sled", "sleek", "sleep", "sleet", "slept",
    "slice", "slick", "slid", "slide", "slim", "slime", "sling", "slip", "slit", "slope",
    "slot", "slow", "slug", "slum", "slump", "smack", "small", "smart", "smash", "smell",
    "smelt", "smile", "smith", "smock", "smog", "smoke", "smooth", "smug", "snack", "snag",
    "snail", "snake", "snap", "snare", "snarl", "sneak", "sniff", "snip", "snob", "snore",
    "snort", "snout", "snow", "snug", "soap", "sock", "sod", "soft", "soil", "sold", "son",
    "song", "soon", "sort", "sound", "soup", "sour", "south", "sow", "spa", "space", "spade",
    "span", "spark", "spat", "spawn", "speak", "spear", "speck", "sped", "speech", "speed",
    "spell", "spelt", "spend", "spent", "spill", "spilt", "spin", "spine", "spit", "spite",
    "splash", "splint", "split", "spoil", "spoke", "sponge", "spool", "spoon", "sport",
    "spot", "spout", "sprain", "sprang", "spray", "spread", "spree", "sprig", "spring",
    "sprint", "sprout", "spun", "spur", "spurt", "squad", "square", "squat", "squid",
    "squint", "squirm", "stab", "stack", "staff", "stag", "stage", "stain", "stair",
    "stale", "stalk", "stall", "stamp", "stand", "star", "starch", "stark", "start",
    "state", "stay", "steam", "steed", "steel", "steep", "steer", "stem", "step", "stern",
    "stew", "stick", "stiff", "still", "stilt", "sting", "stink", "stint", "stir", "stock",
    "stomp", "stone", "stood", "stool", "stoop", "stop", "store", "stork", "storm", "story",
    "stout", "stove", "strain", "strand", "strap", "straw", "stray", "stream", "street",
    "stress", "stretch", "strict", "stride", "strike", "string", "strip", "stripe",
    "stroke", "stroll", "strong", "struck", "strum", "strut", "stub", "stuck", "stud",
    "stuff", "stump", "stun", "stung", "stunt", "sub", "such", "suit", "sum", "sun", "sung",
    "sunk", "surf", "swam", "swamp", "swan", "swap", "swarm", "sway", "sweat", "sweep",
    "sweet", "swell", "swept", "swift", "swim", "swing", "swirl", "switch", "sword",
    "sworn", "swung", "tab", "tack", "tact", "tag", "tail", "tall", "tame", "tan", "tank",
    "tap", "tar", "tart", "task", "taste", "taught", "tax", "tea", "teach", "team", "tear",
    "tell", "ten", "tend", "tent", "term", "tern", "test", "theft", "theme", "thick",
    "thief", "thin", "thing", "think", "thirst", "thorn", "thread", "threat", "three",
    "thrift", "thrill", "throat", "throb", "throne", "throng", "through", "throw", "thrust",
    "thud", "thumb", "thump", "tick", "tide", "tile", "till", "tilt", "time", "tin",
    "tint", "tip", "toad", "toast", "toe", "told", "toll", "ton", "tone", "took", "tool",
    "tooth", "top", "torch", "torn", "toss", "touch", "tough", "tour", "tow", "town",
    "toy", "track", "tract", "trade", "trail", "train", "tram", "tramp", "trap", "trash",
    "tray", "tread", "treat", "tree", "trek", "trench", "trend", "trial", "tribe", "trick",
    "tried", "trim", "trip", "troop", "trot", "trout", "truce", "truck", "trumpet", "trunk", "trust",
    "truth", "tub", "tube", "tuck", "tuft", "tug", "tune", "turf", "turn", "tusk", "twig",
    "twin", "twist", "use", "van", "vast", "vat", "vent", "verb", "vest", "vet", "view",
    "vine", "vow", "wag", "wage", "wail", "waist", "wait", "wake", "walk", "wall", "want",
    "ward", "warm", "warn", "warp", "wash", "wasp", "waste", "watch", "wave", "wax", "way",
    "weak", "wealth", "wear", "web", "wed", "weed", "week", "weep", "weld", "well", "welt",
    "went", "wept", "west", "wet", "whale", "wharf", "wheat", "wheel", "when", "whiff",
    "whim", "whip", "whirl", "whisk", "white", "wick", "wide", "wig", "wild", "will",
    "wilt", "win", "wind", "wing", "wink", "wish", "wisp", "wit", "woke", "wolf", "wood",
    "wool", "word", "wore", "work", "world", "worm", "worn", "worst", "worth", "wound",
    "wrap", "wreck", "wren", "wrist", "write", "wrong", "wrote", "wrung", "yard", "yarn",
    "yawn", "year", "yell", "yet", "yolk", "young", "zest", "zinc", "zone", "zoo",
];

fn inventory() -> impl Iterator<Item = &'static str> {
    LETTERS
        .iter()
        .chain(ONSETS.iter())
        .chain(NUCLEI.iter())
        .chain(CODAS.iter())
        .copied()
}

/// Build the embedded orthographic English model.
///
/// Two passes: seed the inventory so segmentation is available, then
/// segment every lexicon word and accumulate occurrence and adjacency
/// counts on top of the seed.
pub fn builtin_model() -> LanguageModel {
    let mut seed = SegmentStats::new();
    for seg in inventory() {
        seed.add_segment(seg, 1);
    }
    let skeleton = LanguageModel::new(ORTHOGRAPHIC_ENGLISH, Lexicon::new(), seed.clone());

    let mut stats = seed;
    let mut lexicon = Lexicon::new();
    for word in WORDS {
        lexicon.insert(word);
        // total over a-z spellings: every letter is an inventory segment
        if let Ok(seg) = segment(word, &skeleton) {
            let parts = seg.segments();
            for part in parts {
                stats.add_segment(part, 1);
            }
            for pair in parts.windows(2) {
                stats.add_transition(&pair[0], &pair[1], 1);
            }
        }
    }

    LanguageModel::new(ORTHOGRAPHIC_ENGLISH, lexicon, stats)
}

/// Install the built-in model into the process registry. Idempotent;
/// returns the registered instance.
pub fn register() -> Arc<LanguageModel> {
    registry::install(builtin_model())
}
