#![no_main]

use libfuzzer_sys::fuzz_target;
use dexscope::{DexObject, ValidationConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(dex) = DexObject::from_mem_with_validation(data.to_vec(), ValidationConfig::disabled())
    else {
        return;
    };

    let _ = dex.view().map_list();
    if let Ok(names) = dex.class_names() {
        for name in names {
            let _ = dex.class_by_name_resolved(&name);
        }
    }
});
