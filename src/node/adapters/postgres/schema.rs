//! Diesel schema for node persistence.

diesel::table! {
    /// Registered node records.
    nodes (id) {
        /// Internal node identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique caller-supplied fingerprint.
        #[max_length = 255]
        fingerprint -> Varchar,
        /// Lifecycle status (active or inactive).
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        registered_at -> Timestamptz,
        /// Latest sighting timestamp.
        last_seen -> Timestamptz,
        /// Free-form metadata as JSONB. Named to avoid clashing with
        /// reserved `metadata` attributes in storage tooling.
        node_metadata -> Nullable<Jsonb>,
    }
}
