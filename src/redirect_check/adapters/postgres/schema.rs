//! Diesel schema for the payload and profile parameter tables.
//!
//! These tables are owned and migrated elsewhere; this crate only reads
//! them.

diesel::table! {
    /// Built payloads.
    payload (id) {
        /// Internal payload identifier.
        id -> Int4,
        /// External payload identifier.
        uuid -> Text,
    }
}

diesel::table! {
    /// Communication profiles.
    c2profile (id) {
        /// Internal profile identifier.
        id -> Int4,
        /// Unique profile name.
        name -> Text,
    }
}

diesel::table! {
    /// Parameter definitions owned by a profile.
    c2profileparameters (id) {
        /// Internal definition identifier.
        id -> Int4,
        /// Parameter name.
        name -> Text,
        /// Declared value type.
        parameter_type -> Text,
        /// Whether stored values carry key material.
        crypto_type -> Bool,
    }
}

diesel::table! {
    /// Parameter values bound to a payload and profile.
    c2profileparametersinstance (id) {
        /// Internal instance identifier.
        id -> Int4,
        /// Owning payload.
        payload_id -> Nullable<Int4>,
        /// Owning profile.
        c2_profile_id -> Int4,
        /// Definition this value instantiates.
        c2_profile_parameters_id -> Int4,
        /// Raw stored value.
        value -> Text,
        /// Encryption key for crypto-classified values.
        enc_key -> Nullable<Bytea>,
        /// Decryption key for crypto-classified values.
        dec_key -> Nullable<Bytea>,
    }
}

diesel::joinable!(c2profileparametersinstance -> c2profile (c2_profile_id));
diesel::joinable!(c2profileparametersinstance -> c2profileparameters (c2_profile_parameters_id));

diesel::allow_tables_to_appear_in_same_query!(
    payload,
    c2profile,
    c2profileparameters,
    c2profileparametersinstance,
);
