/*!

This is the long-form manual for `lucky_dip` and `convoylog`.

## The lucky dip

A lucky dip draws one name out of the pool of members. The draw avoids:
* the members that already appear in the convoy log, as long as at least one
  member of the pool is not logged yet;
* the members drawn earlier in the same session, as long as at least one
  eligible member was not drawn yet.

When everybody in the pool is logged, the whole pool becomes eligible again and
the pick carries [`ResetReason::AllLogged`](crate::ResetReason::AllLogged): a
new round starts and the user should be told. When everybody eligible was
already drawn during the session, the memory of the session is cleared without
any notice and a member may come up again.

The draw itself is uniform over the eligible names. A name listed twice in the
pool counts twice.

## Name pool

The pool is free text: names separated by newlines or commas. Spaces around a
name are removed and empty names are ignored. Names are compared exactly: `Bob`
and `bob` are two different members.

```text
Alice, Bob
Carol
```

The pool may also be stored as a JSON record:

```json
{ "names": ["Alice", "Bob", "Carol"], "ownerId": "admin", "lastUpdated": 1714521600 }
```

## Log files

The log is read from one or more sources. The `provider` tells how to read it:

### `json`

The document written by `convoylog add` and `convoylog edit`:

```json
{ "logs": [ { "id": "a1", "date": "2024-05-01", "person1": "Alice", "person2": "Bob", "person3": "Carol" } ] }
```

A bare array of entries is accepted as well.

### `csv`

A header row with the columns `date`, `person1`, `person2`, `person3` and
optionally `id`. Entries without an id get one built from the file name and the
line number.

### `xlsx`

The first worksheet of an Excel file, with the same header as `csv`. Another
worksheet is chosen with `--excel-worksheet-name`. Dates may be text or
spreadsheet date serials.

## Configuration

All the options can be given in a JSON configuration file, passed with
`--config`. File paths are relative to the directory of the configuration file.

```json
{
  "outputSettings": { "logName": "Convoy log", "outputPath": "stdout" },
  "poolSource": { "provider": "text", "filePath": "pool.txt" },
  "logSources": [ { "provider": "json", "filePath": "logs.json" } ],
  "rules": { "randomSeed": "42", "picksPerRequest": "3" }
}
```

The command line flags take precedence over the configuration file.

*/
