//! Built-in ability definitions.

use super::AbilityDef;
use crate::play_area::PlayArea;

pub(super) fn definitions() -> [AbilityDef; 5] {
    [
        AbilityDef {
            key: "dump",
            eligible: |area| !area.placed().is_empty(),
            apply: dump,
        },
        AbilityDef {
            key: "mulligan",
            eligible: |area| area.hand_count() > 0 && !area.bag().is_empty(),
            apply: |area| area.discard_all().draw_all(),
        },
        AbilityDef {
            key: "swap",
            eligible: |area| !area.placed().is_empty() && !area.bag().is_empty(),
            apply: |area| area.bury_last_placed().draw(),
        },
        AbilityDef {
            key: "polish",
            eligible: |area| !area.placed().is_empty(),
            apply: |area| area.upgrade_placed(1),
        },
        AbilityDef {
            key: "flip",
            eligible: |area| area.hand_count() > 0,
            apply: |area| {
                let order = area.stack_order().flipped();
                area.set_stack_order(order)
            },
        },
    ]
}

/// Throws the placed letters back into the bag and draws as many fresh ones.
fn dump(area: PlayArea) -> PlayArea {
    let count = area.placed().len();
    area.discard_placed().draw_n(count)
}
