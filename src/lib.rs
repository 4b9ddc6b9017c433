/*! # About
A generic in-memory hash map built as a fixed-width directory of independently
growing Robin-Hood open-addressed subtables, rather than one monolithic
table. The two-level layout trades a small amount of indirection for lower
per-resize cost: growing one subtable re-hashes a fraction of the map's
entries instead of all of them.

# Map

- [`map::HashMap`]: the public entry point. A directory of
  [`map::Subtable`]s behind the same `insert`/`get`/`remove`/`at` surface
  `std::collections::HashMap` users already expect, plus `get_or_insert_default`
  for the auto-vivifying access pattern `Index` can't express safely.

- [`map::Subtable`]: one self-contained Robin-Hood table. Usable on its own;
  `HashMap` is a thin router on top that picks which subtable owns a given key
  and forwards a precomputed hash down so the key is only ever hashed once.

- [`map::MissingKeyError`]: the one typed failure the map raises, from `at`.
*/

pub mod map;
