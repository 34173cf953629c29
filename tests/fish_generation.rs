// Native tests for the fish generator. Golden bitmaps were captured from the
// live site's renderer, so any drift here changes fish users have already seen.

use pixel_aquarium::fish::palette::{EYE, LIGHT, PRIMARY, SECONDARY, TEETH};
use pixel_aquarium::fish::{self, Color, FishDescriptor};
use pixel_aquarium::{SeededRandom, Seed};

fn rows(fish: &FishDescriptor) -> Vec<String> {
    fish.bitmap
        .rows()
        .map(|r| r.iter().map(|v| char::from(b'0' + v)).collect())
        .collect()
}

fn primary_hue(fish: &FishDescriptor) -> f64 {
    match fish.palette.get(PRIMARY) {
        Some(Color::Hsl { h, .. }) => h,
        other => panic!("primary should be hsl, got {other:?}"),
    }
}

#[test]
fn uuid_seed_matches_golden() {
    let fish = fish::generate("00000000-0000-7000-8000-000000000000");
    assert_eq!(
        rows(&fish),
        [
            "00000000000000000000000",
            "00000012111211120011110",
            "00000112111211121111111",
            "11111112111211121111111",
            "11112222222222222111311",
            "11111112111211121111111",
            "00000112111211121111111",
            "00000012111211120011110",
        ]
    );
    assert_eq!(fish.scale, 0.4205735596707819);
    assert_eq!(primary_hue(&fish), 136.48302469135803);
}

#[test]
fn empty_seed_has_teeth() {
    let fish = fish::generate("");
    assert_eq!(
        rows(&fish),
        [
            "100000000000000000000000",
            "110000011111111110011110",
            "111000111111111111111111",
            "111102222222222222111111",
            "111111111111111111111311",
            "111101111111111111111111",
            "111000222222222222111414",
            "110000011111111110011110",
        ]
    );
    assert_eq!(fish.scale, 0.3907124485596708);
    assert_eq!(primary_hue(&fish), 230.6496913580247);
    assert!(fish.palette.contains(TEETH));
    assert!(!fish.palette.contains(LIGHT));
}

#[test]
fn anglerfish_light_and_palette() {
    let fish = fish::generate("fish-16");
    assert_eq!(
        rows(&fish),
        [
            "1000000000000000000000",
            "1100000111111111005550",
            "1110011111111111111511",
            "1111011111111111111511",
            "1111111111111111111311",
            "1111011111111111111111",
            "1110011111111111111111",
            "1100000111111111001110",
        ]
    );
    assert_eq!(fish.scale, 0.36147633744855967);
    assert_eq!(primary_hue(&fish), 10.566358024691358);
    assert_eq!(fish.palette.get(LIGHT), Some(Color::Rgb(0xff, 0xff, 0x00)));
    assert!(!fish.palette.contains(TEETH));
}

#[test]
fn generation_is_deterministic() {
    for seed in ["", "fish-0", "fish-16", "0190a6e4-1c2b-7d3e-9f40-5a6b7c8d9e0f"] {
        assert_eq!(fish::generate(seed), fish::generate(seed), "seed {seed:?}");
    }
}

#[test]
fn equal_code_unit_sums_collide() {
    assert_eq!(Seed::new("ab").value(), Seed::new("ba").value());
    let ab = fish::generate("ab");
    assert_eq!(ab, fish::generate("ba"));
    assert_eq!((ab.width(), ab.height()), (23, 11));
    assert_eq!(fish::generate("fish-16"), fish::generate("fish-25"));
}

#[test]
fn width_is_parts_minus_overlap() {
    for seed in ["", "ab", "fish-0", "fish-7", "00000000-0000-7000-8000-000000000000"] {
        let parts = fish::build_parts(&mut SeededRandom::new(Seed::new(seed).value()));
        let fish = fish::generate(seed);
        assert_eq!(
            fish.width(),
            parts.tail.width() + parts.body.width() + parts.head.width() - 2 * fish::PART_OVERLAP
        );
        assert_eq!(fish.height(), parts.body.height());
        assert_eq!(parts.head.height(), parts.body.height());
        assert!((8..=11).contains(&fish.height()));
    }
}

#[test]
fn palette_covers_every_used_index() {
    for i in 0..64 {
        let fish = fish::generate(&format!("fish-{i}"));
        for (_, _, v) in fish.bitmap.cells() {
            if v != 0 {
                assert!(fish.palette.contains(v), "fish-{i} uses {v} without a color");
            }
        }
        for idx in [PRIMARY, SECONDARY, EYE] {
            assert!(fish.palette.contains(idx));
        }
        assert!((0.3..0.6).contains(&fish.scale));
    }
}

#[test]
fn spawn_time_from_uuid_v7() {
    let seed = Seed::new("0190a6e4-1c2b-7d3e-9f40-5a6b7c8d9e0f");
    assert_eq!(seed.timestamp_ms(), Some(0x0190_a6e4_1c2b));
    assert!(seed.spawned_at().is_some());
    assert_eq!(Seed::new("fish-16").timestamp_ms(), None);
}
